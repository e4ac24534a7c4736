//! 成绩存储操作
//!
//! 每次保存都会重新计算百分比。

use super::SeaOrmStorage;
use crate::entity::marks::{ActiveModel, Column, Entity as Marks, Model};
use crate::errors::{Result, SchoolHubError};
use crate::models::marks::{
    entities::{Mark, compute_percentage},
    requests::{CreateMarkRequest, MarkListParams, UpdateMarkRequest},
    responses::MarkUpsert,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    async fn attach_mark_users(&self, models: Vec<Model>) -> Result<Vec<Mark>> {
        let ids = models
            .iter()
            .flat_map(|m| std::iter::once(m.student_id).chain(m.teacher_id));
        let users = Self::load_users_map(&self.db, ids).await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let student = users.get(&m.student_id);
                let teacher = m.teacher_id.and_then(|id| users.get(&id));
                m.into_mark(student, teacher)
            })
            .collect())
    }

    async fn find_mark_model(&self, id: i64) -> Result<Option<Model>> {
        Marks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询成绩失败: {e}")))
    }

    /// 按 学生+科目+考试类型 更新或创建成绩
    ///
    /// 并发请求同时插入时，落败的一方在唯一索引冲突后按更新重试一次。
    pub async fn upsert_mark_impl(&self, req: CreateMarkRequest) -> Result<MarkUpsert> {
        match self.save_mark(req.clone()).await {
            Err(e) if e.is_unique_violation() => self.save_mark(req).await,
            result => result,
        }
    }

    async fn save_mark(&self, req: CreateMarkRequest) -> Result<MarkUpsert> {
        let now = chrono::Utc::now().timestamp();
        let percentage = compute_percentage(req.marks_obtained, req.total_marks);

        let existing = Marks::find()
            .filter(Column::StudentId.eq(req.student_id))
            .filter(Column::Subject.eq(req.subject.as_str()))
            .filter(Column::ExamType.eq(req.exam_type.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询成绩失败: {e}")))?;

        let (saved, created) = match existing {
            Some(row) => {
                let mut model: ActiveModel = row.into();
                model.marks_obtained = Set(req.marks_obtained);
                model.total_marks = Set(req.total_marks);
                model.percentage = Set(percentage);
                model.remarks = Set(req.remarks);
                model.class_name = Set(req.class_name);
                model.division = Set(req.division);
                model.teacher_id = Set(req.teacher_id);
                model.updated_at = Set(now);
                let saved = model
                    .update(&self.db)
                    .await
                    .map_err(|e| SchoolHubError::database_operation(format!("更新成绩失败: {e}")))?;
                (saved, false)
            }
            None => {
                let model = ActiveModel {
                    student_id: Set(req.student_id),
                    subject: Set(req.subject),
                    exam_type: Set(req.exam_type),
                    marks_obtained: Set(req.marks_obtained),
                    total_marks: Set(req.total_marks),
                    percentage: Set(percentage),
                    remarks: Set(req.remarks),
                    class_name: Set(req.class_name),
                    division: Set(req.division),
                    teacher_id: Set(req.teacher_id),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                let saved = model
                    .insert(&self.db)
                    .await
                    .map_err(|e| SchoolHubError::database_operation(format!("创建成绩失败: {e}")))?;
                (saved, true)
            }
        };

        let mark = self
            .attach_mark_users(vec![saved])
            .await?
            .pop()
            .ok_or_else(|| SchoolHubError::database_operation("保存成绩失败: 无返回记录"))?;

        Ok(MarkUpsert { mark, created })
    }

    /// 通过 ID 获取成绩
    pub async fn get_mark_by_id_impl(&self, id: i64) -> Result<Option<Mark>> {
        let Some(model) = self.find_mark_model(id).await? else {
            return Ok(None);
        };
        Ok(self.attach_mark_users(vec![model]).await?.pop())
    }

    /// 列出成绩
    pub async fn list_marks_impl(&self, query: MarkListParams) -> Result<Vec<Mark>> {
        let mut select = Marks::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(ref class_name) = query.class_name {
            select = select.filter(Column::ClassName.eq(class_name.as_str()));
        }
        if let Some(ref division) = query.division {
            select = select.filter(Column::Division.eq(division.as_str()));
        }
        if let Some(ref subject) = query.subject {
            select = select.filter(Column::Subject.eq(subject.as_str()));
        }
        if let Some(ref exam_type) = query.exam_type {
            select = select.filter(Column::ExamType.eq(exam_type.as_str()));
        }

        let models = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询成绩列表失败: {e}")))?;

        self.attach_mark_users(models).await
    }

    /// 更新成绩，百分比按更新后的分数重新计算
    pub async fn update_mark_impl(&self, id: i64, update: UpdateMarkRequest) -> Result<Option<Mark>> {
        let Some(existing) = self.find_mark_model(id).await? else {
            return Ok(None);
        };

        let marks_obtained = update.marks_obtained.unwrap_or(existing.marks_obtained);
        let total_marks = update.total_marks.unwrap_or(existing.total_marks);

        let mut model = ActiveModel {
            id: Set(id),
            marks_obtained: Set(marks_obtained),
            total_marks: Set(total_marks),
            percentage: Set(compute_percentage(marks_obtained, total_marks)),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(subject) = update.subject {
            model.subject = Set(subject);
        }
        if let Some(exam_type) = update.exam_type {
            model.exam_type = Set(exam_type);
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(Some(remarks));
        }
        if let Some(class_name) = update.class_name {
            model.class_name = Set(Some(class_name));
        }
        if let Some(division) = update.division {
            model.division = Set(Some(division));
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("更新成绩失败: {e}")))?;

        self.get_mark_by_id_impl(id).await
    }

    /// 删除成绩
    pub async fn delete_mark_impl(&self, id: i64) -> Result<bool> {
        let result = Marks::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 班级成绩
    pub async fn list_marks_by_class_impl(
        &self,
        class_name: &str,
        division: &str,
    ) -> Result<Vec<Mark>> {
        let models = Marks::find()
            .filter(Column::ClassName.eq(class_name))
            .filter(Column::Division.eq(division))
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级成绩失败: {e}")))?;

        let mut marks = self.attach_mark_users(models).await?;
        marks.sort_by(|a, b| {
            a.student_name
                .cmp(&b.student_name)
                .then_with(|| a.subject.cmp(&b.subject))
                .then_with(|| a.exam_type.cmp(&b.exam_type))
        });
        Ok(marks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::utils::password::make_unusable_password;

    async fn seed_user(storage: &SeaOrmStorage, name: &str, role: UserRole) -> i64 {
        storage
            .create_user_impl(CreateUserRequest {
                name: name.to_string(),
                email: format!("{}@school.in", name.to_lowercase()),
                password: Some(make_unusable_password()),
                role,
                class_name: Some("9".to_string()),
                division: Some("A".to_string()),
                subject: Some("Maths".to_string()),
                phone: None,
                is_active: None,
            })
            .await
            .unwrap()
            .id
    }

    fn mark(student_id: i64, subject: &str, obtained: f64, teacher_id: Option<i64>) -> CreateMarkRequest {
        CreateMarkRequest {
            student_id,
            subject: subject.to_string(),
            exam_type: "Mid Term".to_string(),
            marks_obtained: obtained,
            total_marks: 80.0,
            remarks: None,
            class_name: Some("9".to_string()),
            division: Some("A".to_string()),
            teacher_id,
        }
    }

    #[actix_web::test]
    async fn test_upsert_creates_then_updates() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "Iyer", UserRole::Teacher).await;
        let asha = seed_user(&storage, "Asha", UserRole::Student).await;

        let first = storage
            .upsert_mark_impl(mark(asha, "Maths", 60.0, Some(teacher)))
            .await
            .unwrap();
        assert!(first.created);
        assert_eq!(first.mark.percentage, 75.0);
        assert_eq!(first.mark.student_name.as_deref(), Some("Asha"));
        assert_eq!(first.mark.teacher_name.as_deref(), Some("Iyer"));
        assert_eq!(first.mark.subject_name, "Maths");

        let second = storage
            .upsert_mark_impl(mark(asha, "Maths", 70.0, Some(teacher)))
            .await
            .unwrap();
        assert!(!second.created);
        assert_eq!(second.mark.id, first.mark.id);
        assert_eq!(second.mark.percentage, 87.5);
    }

    #[actix_web::test]
    async fn test_concurrent_upserts_keep_one_row() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let asha = seed_user(&storage, "Asha", UserRole::Student).await;

        let (a, b) = tokio::join!(
            storage.upsert_mark_impl(mark(asha, "Maths", 60.0, None)),
            storage.upsert_mark_impl(mark(asha, "Maths", 64.0, None)),
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.mark.id, b.mark.id);
        assert!(a.created != b.created);

        let rows = storage
            .list_marks_impl(MarkListParams {
                student_id: Some(asha),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[actix_web::test]
    async fn test_update_recomputes_percentage() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let asha = seed_user(&storage, "Asha", UserRole::Student).await;
        let saved = storage
            .upsert_mark_impl(mark(asha, "Science", 40.0, None))
            .await
            .unwrap();

        let updated = storage
            .update_mark_impl(
                saved.mark.id,
                UpdateMarkRequest {
                    total_marks: Some(60.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.percentage, 66.67);
    }

    #[actix_web::test]
    async fn test_by_class_sorted_by_student_then_subject() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let zoya = seed_user(&storage, "Zoya", UserRole::Student).await;
        let arjun = seed_user(&storage, "Arjun", UserRole::Student).await;

        for (student, subject) in [(zoya, "Maths"), (arjun, "Science"), (arjun, "English")] {
            storage
                .upsert_mark_impl(mark(student, subject, 50.0, None))
                .await
                .unwrap();
        }

        let marks = storage.list_marks_by_class_impl("9", "A").await.unwrap();
        let order: Vec<_> = marks
            .iter()
            .map(|m| (m.student_name.as_deref().unwrap_or_default(), m.subject.as_str()))
            .collect();
        assert_eq!(
            order,
            [("Arjun", "English"), ("Arjun", "Science"), ("Zoya", "Maths")]
        );
    }
}
