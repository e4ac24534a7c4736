//! 活动存储操作

use super::SeaOrmStorage;
use crate::entity::events::{ActiveModel, Column, Entity as Events};
use crate::errors::{Result, SchoolHubError};
use crate::models::events::{
    entities::{Event, EventAudience},
    requests::{CreateEventRequest, EventListParams, UpdateEventRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

impl SeaOrmStorage {
    /// 创建活动
    pub async fn create_event_impl(&self, req: CreateEventRequest) -> Result<Event> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            date: Set(req.date),
            audience: Set(req.audience.to_string()),
            class_name: Set(req.class_name),
            division: Set(req.division),
            created_by: Set(req.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("创建活动失败: {e}")))?;

        Ok(result.into_event())
    }

    /// 通过 ID 获取活动
    pub async fn get_event_by_id_impl(&self, id: i64) -> Result<Option<Event>> {
        let result = Events::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.map(|m| m.into_event()))
    }

    /// 列出活动
    ///
    /// `audience=X` 匹配 ALL 或 X，`className=C` 匹配 ALL 或 class_name = C。
    pub async fn list_events_impl(&self, query: EventListParams) -> Result<Vec<Event>> {
        let all = EventAudience::All.to_string();
        let mut select = Events::find();

        if let Some(audience) = query.audience {
            select = select.filter(
                Condition::any()
                    .add(Column::Audience.eq(all.as_str()))
                    .add(Column::Audience.eq(audience.to_string())),
            );
        }
        if let Some(ref class_name) = query.class_name {
            select = select.filter(
                Condition::any()
                    .add(Column::Audience.eq(all.as_str()))
                    .add(Column::ClassName.eq(class_name.as_str())),
            );
        }

        let models = select
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询活动列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_event()).collect())
    }

    /// 指定班级的活动，仅匹配 class_name，不含全校活动
    pub async fn list_class_events_impl(&self, class_name: &str) -> Result<Vec<Event>> {
        let models = Events::find()
            .filter(Column::ClassName.eq(class_name))
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级活动失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_event()).collect())
    }

    /// 更新活动
    pub async fn update_event_impl(
        &self,
        id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<Event>> {
        if self.get_event_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(date) = update.date {
            model.date = Set(date);
        }
        if let Some(audience) = update.audience {
            model.audience = Set(audience.to_string());
        }
        if let Some(class_name) = update.class_name {
            model.class_name = Set(Some(class_name));
        }
        if let Some(division) = update.division {
            model.division = Set(Some(division));
        }
        if let Some(created_by) = update.created_by {
            model.created_by = Set(Some(created_by));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("更新活动失败: {e}")))?;

        self.get_event_by_id_impl(id).await
    }

    /// 删除活动
    pub async fn delete_event_impl(&self, id: i64) -> Result<bool> {
        let result = Events::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除活动失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 最新创建的活动
    pub async fn list_recent_events_impl(&self, limit: u64) -> Result<Vec<Event>> {
        let models = Events::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询最新活动失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_event()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(title: &str, date: &str, audience: EventAudience, class_name: Option<&str>) -> CreateEventRequest {
        CreateEventRequest {
            title: title.to_string(),
            description: None,
            date: date.parse().unwrap(),
            audience,
            class_name: class_name.map(str::to_string),
            division: None,
            created_by: Some("Principal".to_string()),
        }
    }

    #[actix_web::test]
    async fn test_audience_and_class_filters_include_all() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_event_impl(event("Sports day", "2025-04-01", EventAudience::All, None))
            .await
            .unwrap();
        storage
            .create_event_impl(event("Lab visit", "2025-04-03", EventAudience::Class, Some("9")))
            .await
            .unwrap();
        storage
            .create_event_impl(event("Debate", "2025-04-02", EventAudience::Class, Some("10")))
            .await
            .unwrap();

        let for_nine = storage
            .list_events_impl(EventListParams {
                audience: None,
                class_name: Some("9".to_string()),
            })
            .await
            .unwrap();
        let titles: Vec<_> = for_nine.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Lab visit", "Sports day"]);

        let class_events = storage
            .list_events_impl(EventListParams {
                audience: Some(EventAudience::Class),
                class_name: None,
            })
            .await
            .unwrap();
        assert_eq!(class_events.len(), 3);

        let recent = storage.list_recent_events_impl(2).await.unwrap();
        assert_eq!(recent[0].title, "Debate");
    }

    #[actix_web::test]
    async fn test_class_events_exclude_school_wide() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_event_impl(event("Sports day", "2025-04-01", EventAudience::All, None))
            .await
            .unwrap();
        storage
            .create_event_impl(event("Lab visit", "2025-04-03", EventAudience::Class, Some("9")))
            .await
            .unwrap();
        storage
            .create_event_impl(event("Quiz", "2025-04-05", EventAudience::Class, Some("9")))
            .await
            .unwrap();

        let events = storage.list_class_events_impl("9").await.unwrap();
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Quiz", "Lab visit"]);

        assert!(storage.list_class_events_impl("10").await.unwrap().is_empty());
    }
}
