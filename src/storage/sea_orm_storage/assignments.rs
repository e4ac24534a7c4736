//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments, Model};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{Result, SchoolHubError};
use crate::models::assignments::{
    entities::Assignment,
    requests::{AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::HashMap;

impl SeaOrmStorage {
    async fn attach_assignment_names(&self, models: Vec<Model>) -> Result<Vec<Assignment>> {
        let teachers = Self::load_users_map(&self.db, models.iter().map(|m| m.teacher_id)).await?;

        let subject_ids: Vec<i64> = models.iter().filter_map(|m| m.subject_id).collect();
        let subjects: HashMap<i64, _> = if subject_ids.is_empty() {
            HashMap::new()
        } else {
            Subjects::find()
                .filter(SubjectColumn::Id.is_in(subject_ids))
                .all(&self.db)
                .await
                .map_err(|e| SchoolHubError::database_operation(format!("批量查询科目失败: {e}")))?
                .into_iter()
                .map(|s| (s.id, s))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| {
                let teacher = teachers.get(&m.teacher_id);
                let subject = m.subject_id.and_then(|id| subjects.get(&id));
                m.into_assignment(teacher, subject)
            })
            .collect())
    }

    /// 创建作业
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date),
            class_name: Set(req.class_name),
            division: Set(req.division),
            subject_id: Set(req.subject_id),
            teacher_id: Set(req.teacher_id),
            status: Set(req.status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("创建作业失败: {e}")))?;

        self.attach_assignment_names(vec![result])
            .await?
            .pop()
            .ok_or_else(|| SchoolHubError::database_operation("创建作业失败: 无返回记录"))
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询作业失败: {e}")))?;

        let Some(model) = result else {
            return Ok(None);
        };
        Ok(self.attach_assignment_names(vec![model]).await?.pop())
    }

    /// 列出作业，按截止日期排序
    pub async fn list_assignments_impl(
        &self,
        query: AssignmentListParams,
    ) -> Result<Vec<Assignment>> {
        let mut select = Assignments::find();

        if let Some(ref class_name) = query.class_name {
            select = select.filter(Column::ClassName.eq(class_name.as_str()));
        }
        if let Some(ref division) = query.division {
            select = select.filter(Column::Division.eq(division.as_str()));
        }
        if let Some(subject_id) = query.subject {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(teacher_id) = query.teacher {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let models = select
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询作业列表失败: {e}")))?;

        self.attach_assignment_names(models).await
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        if self.get_assignment_by_id_impl(id).await?.is_none() {
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
        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date);
        }
        if let Some(class_name) = update.class_name {
            model.class_name = Set(class_name);
        }
        if let Some(division) = update.division {
            model.division = Set(Some(division));
        }
        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(Some(subject_id));
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("更新作业失败: {e}")))?;

        self.get_assignment_by_id_impl(id).await
    }

    /// 删除作业
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
