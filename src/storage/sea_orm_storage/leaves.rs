//! 请假存储操作

use super::SeaOrmStorage;
use crate::entity::leaves::{ActiveModel, Column, Entity as Leaves, Model};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{Result, SchoolHubError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    leaves::{
        entities::{Leave, LeaveStatus},
        requests::{LeaveListQuery, LeaveWrite},
        responses::LeaveListResponse,
    },
    users::entities::UserRole,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};

impl SeaOrmStorage {
    async fn attach_leave_students(&self, models: Vec<Model>) -> Result<Vec<Leave>> {
        let students =
            Self::load_users_map(&self.db, models.iter().map(|m| m.student_id)).await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let student = students.get(&m.student_id);
                m.into_leave(student)
            })
            .collect())
    }

    /// 班级学生 ID 列表
    async fn student_ids_in_class(&self, class_number: i32, division: &str) -> Result<Vec<i64>> {
        Users::find()
            .select_only()
            .column(UserColumn::Id)
            .filter(UserColumn::Role.eq(UserRole::Student.to_string()))
            .filter(UserColumn::ClassName.eq(class_number.to_string()))
            .filter(UserColumn::Division.eq(division))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级学生失败: {e}")))
    }

    async fn filtered_leaves(&self, query: &LeaveListQuery) -> Result<Select<Leaves>> {
        let mut select = Leaves::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let (Some(class_number), Some(division)) = (query.class_number, &query.division) {
            let ids = self.student_ids_in_class(class_number, division).await?;
            select = select.filter(Column::StudentId.is_in(ids));
        }

        Ok(select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id))
    }

    /// 创建请假
    pub async fn create_leave_impl(&self, leave: LeaveWrite) -> Result<Leave> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(leave.student_id),
            reason: Set(leave.reason),
            start_date: Set(leave.start_date),
            end_date: Set(leave.end_date),
            details: Set(leave.details),
            status: Set(leave.status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("创建请假失败: {e}")))?;

        self.attach_leave_students(vec![result])
            .await?
            .pop()
            .ok_or_else(|| SchoolHubError::database_operation("创建请假失败: 无返回记录"))
    }

    /// 通过 ID 获取请假
    pub async fn get_leave_by_id_impl(&self, id: i64) -> Result<Option<Leave>> {
        let result = Leaves::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询请假失败: {e}")))?;

        let Some(model) = result else {
            return Ok(None);
        };
        Ok(self.attach_leave_students(vec![model]).await?.pop())
    }

    /// 分页列出请假
    pub async fn list_leaves_with_pagination_impl(
        &self,
        query: LeaveListQuery,
    ) -> Result<LeaveListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);
        let select = self.filtered_leaves(&query).await?;

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询请假总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询请假页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询请假列表失败: {e}")))?;

        Ok(LeaveListResponse {
            items: self.attach_leave_students(models).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 整体更新请假
    pub async fn update_leave_impl(&self, id: i64, leave: LeaveWrite) -> Result<Option<Leave>> {
        let existing = Leaves::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询请假失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id),
            student_id: Set(leave.student_id),
            reason: Set(leave.reason),
            start_date: Set(leave.start_date),
            end_date: Set(leave.end_date),
            details: Set(leave.details),
            status: Set(leave.status.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("更新请假失败: {e}")))?;

        self.get_leave_by_id_impl(id).await
    }

    /// 修改请假状态
    pub async fn update_leave_status_impl(
        &self,
        id: i64,
        status: LeaveStatus,
    ) -> Result<Option<Leave>> {
        let existing = Leaves::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询请假失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("更新请假状态失败: {e}")))?;

        self.get_leave_by_id_impl(id).await
    }

    /// 删除请假
    pub async fn delete_leave_impl(&self, id: i64) -> Result<bool> {
        let result = Leaves::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除请假失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 班级待审批请假
    pub async fn list_pending_leaves_for_class_impl(
        &self,
        class_number: i32,
        division: &str,
    ) -> Result<Vec<Leave>> {
        let query = LeaveListQuery {
            status: Some(LeaveStatus::Pending),
            class_number: Some(class_number),
            division: Some(division.to_string()),
            ..Default::default()
        };

        let models = self
            .filtered_leaves(&query)
            .await?
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询待审批请假失败: {e}")))?;

        self.attach_leave_students(models).await
    }

    /// 最新请假
    pub async fn list_recent_leaves_impl(&self, limit: u64) -> Result<Vec<Leave>> {
        let models = Leaves::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询最新请假失败: {e}")))?;

        self.attach_leave_students(models).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::requests::CreateUserRequest;
    use crate::utils::password::make_unusable_password;

    async fn seed_student(storage: &SeaOrmStorage, name: &str, division: &str) -> i64 {
        storage
            .create_user_impl(CreateUserRequest {
                name: name.to_string(),
                email: format!("{}@school.in", name.to_lowercase()),
                password: Some(make_unusable_password()),
                role: UserRole::Student,
                class_name: Some("9".to_string()),
                division: Some(division.to_string()),
                subject: None,
                phone: None,
                is_active: None,
            })
            .await
            .unwrap()
            .id
    }

    fn leave(student_id: i64, reason: &str) -> LeaveWrite {
        LeaveWrite {
            student_id,
            reason: reason.to_string(),
            start_date: "2025-03-01".parse().unwrap(),
            end_date: "2025-03-02".parse().unwrap(),
            details: Some("note from parent".to_string()),
            status: LeaveStatus::Pending,
        }
    }

    #[actix_web::test]
    async fn test_leave_carries_student_fields() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let asha = seed_student(&storage, "Asha", "A").await;

        let created = storage.create_leave_impl(leave(asha, "Fever")).await.unwrap();
        assert_eq!(created.student_name.as_deref(), Some("Asha"));
        assert_eq!(created.class_name.as_deref(), Some("9"));
        assert_eq!(created.division.as_deref(), Some("A"));
        assert_eq!(created.status, LeaveStatus::Pending);

        let approved = storage
            .update_leave_status_impl(created.id, LeaveStatus::Approved)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(approved.reason, "Fever");
    }

    #[actix_web::test]
    async fn test_full_update_clears_details() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let asha = seed_student(&storage, "Asha", "A").await;
        let created = storage.create_leave_impl(leave(asha, "Fever")).await.unwrap();

        let mut replacement = leave(asha, "Family function");
        replacement.details = None;
        let updated = storage
            .update_leave_impl(created.id, replacement)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.reason, "Family function");
        assert_eq!(updated.details, None);
    }

    #[actix_web::test]
    async fn test_pending_leaves_restricted_to_class() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let asha = seed_student(&storage, "Asha", "A").await;
        let meera = seed_student(&storage, "Meera", "B").await;

        storage.create_leave_impl(leave(asha, "Fever")).await.unwrap();
        storage.create_leave_impl(leave(meera, "Trip")).await.unwrap();
        let decided = storage.create_leave_impl(leave(asha, "Wedding")).await.unwrap();
        storage
            .update_leave_status_impl(decided.id, LeaveStatus::Rejected)
            .await
            .unwrap();

        let pending = storage
            .list_pending_leaves_for_class_impl(9, "A")
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].reason, "Fever");

        let recent = storage.list_recent_leaves_impl(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].reason, "Wedding");
    }
}
