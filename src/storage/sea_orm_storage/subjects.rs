//! 科目存储操作

use super::SeaOrmStorage;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects, Model};
use crate::errors::{Result, SchoolHubError};
use crate::models::subjects::{
    entities::Subject,
    requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    async fn attach_subject_teachers(&self, models: Vec<Model>) -> Result<Vec<Subject>> {
        let teachers =
            Self::load_users_map(&self.db, models.iter().filter_map(|m| m.class_teacher_id))
                .await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let teacher = m.class_teacher_id.and_then(|id| teachers.get(&id));
                m.into_subject(teacher)
            })
            .collect())
    }

    /// 创建科目
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            class_name: Set(req.class_name),
            class_teacher_id: Set(req.class_teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("创建科目失败: {e}")))?;

        self.attach_subject_teachers(vec![result])
            .await?
            .pop()
            .ok_or_else(|| SchoolHubError::database_operation("创建科目失败: 无返回记录"))
    }

    /// 通过 ID 获取科目
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询科目失败: {e}")))?;

        let Some(model) = result else {
            return Ok(None);
        };
        Ok(self.attach_subject_teachers(vec![model]).await?.pop())
    }

    /// 列出科目
    pub async fn list_subjects_impl(&self, query: SubjectListQuery) -> Result<Vec<Subject>> {
        let mut select = Subjects::find();

        if let Some(ref class_name) = query.class_name {
            select = select.filter(Column::ClassName.eq(class_name.as_str()));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::ClassTeacherId.eq(teacher_id));
        }

        let models = select
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询科目列表失败: {e}")))?;

        self.attach_subject_teachers(models).await
    }

    /// 更新科目
    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(class_name) = update.class_name {
            model.class_name = Set(Some(class_name));
        }
        // Some(None) 表示解除任课教师
        if let Some(class_teacher_id) = update.class_teacher_id {
            model.class_teacher_id = Set(class_teacher_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("更新科目失败: {e}")))?;

        self.get_subject_by_id_impl(id).await
    }

    /// 删除科目
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::utils::password::make_unusable_password;

    async fn seed_teacher(storage: &SeaOrmStorage, name: &str, subject: &str) -> i64 {
        storage
            .create_user_impl(CreateUserRequest {
                name: name.to_string(),
                email: format!("{}@school.in", name.to_lowercase()),
                password: Some(make_unusable_password()),
                role: UserRole::Teacher,
                class_name: None,
                division: None,
                subject: Some(subject.to_string()),
                phone: None,
                is_active: None,
            })
            .await
            .unwrap()
            .id
    }

    fn subject(name: &str, class_name: &str, teacher_id: Option<i64>) -> CreateSubjectRequest {
        CreateSubjectRequest {
            name: name.to_string(),
            class_name: Some(class_name.to_string()),
            class_teacher_id: teacher_id,
        }
    }

    #[actix_web::test]
    async fn test_filters_and_teacher_name() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let meera = seed_teacher(&storage, "Meera", "Maths").await;
        let john = seed_teacher(&storage, "John", "Science").await;

        let maths = storage
            .create_subject_impl(subject("Maths", "9A", Some(meera)))
            .await
            .unwrap();
        assert_eq!(maths.teacher_name.as_deref(), Some("Meera"));
        storage
            .create_subject_impl(subject("Science", "9A", Some(john)))
            .await
            .unwrap();
        storage
            .create_subject_impl(subject("Algebra", "10B", Some(meera)))
            .await
            .unwrap();

        let nine_a = storage
            .list_subjects_impl(SubjectListQuery {
                class_name: Some("9A".to_string()),
                teacher_id: None,
            })
            .await
            .unwrap();
        let names: Vec<_> = nine_a.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Maths", "Science"]);

        let by_meera = storage
            .list_subjects_impl(SubjectListQuery {
                class_name: None,
                teacher_id: Some(meera),
            })
            .await
            .unwrap();
        let names: Vec<_> = by_meera.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Algebra", "Maths"]);
    }

    #[actix_web::test]
    async fn test_teacher_unlinked_on_update_and_delete() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let meera = seed_teacher(&storage, "Meera", "Maths").await;

        let maths = storage
            .create_subject_impl(subject("Maths", "9A", Some(meera)))
            .await
            .unwrap();
        let physics = storage
            .create_subject_impl(subject("Physics", "9A", Some(meera)))
            .await
            .unwrap();

        let updated = storage
            .update_subject_impl(
                maths.id,
                UpdateSubjectRequest {
                    class_teacher_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.class_teacher_id.is_none());
        assert!(updated.teacher_name.is_none());
        assert_eq!(updated.name, "Maths");

        assert!(storage.delete_user_impl(meera).await.unwrap());
        let physics = storage
            .get_subject_by_id_impl(physics.id)
            .await
            .unwrap()
            .unwrap();
        assert!(physics.class_teacher_id.is_none());

        assert!(storage.delete_subject_impl(physics.id).await.unwrap());
        assert!(!storage.delete_subject_impl(physics.id).await.unwrap());
    }
}
