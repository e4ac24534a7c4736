//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes, Model};
use crate::errors::{Result, SchoolHubError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    classes::{
        entities::Class,
        requests::{ClassListQuery, ClassWrite},
        responses::ClassListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 数据库模型转换为业务实体，附带学生人数
    async fn with_students_count(&self, model: Model) -> Result<Class> {
        let count = self
            .count_students_in_class(model.class_number, &model.division)
            .await?;
        Ok(model.into_class(count))
    }

    fn encode_class_json(class: &ClassWrite) -> Result<(String, String)> {
        let subject_teachers = serde_json::to_string(&class.subject_teachers)?;
        let subjects = serde_json::to_string(&class.subjects)?;
        Ok((subject_teachers, subjects))
    }

    /// 创建班级
    pub async fn create_class_impl(&self, class: ClassWrite) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();
        let (subject_teachers, subjects) = Self::encode_class_json(&class)?;

        let model = ActiveModel {
            class_number: Set(class.class_number),
            division: Set(class.division),
            class_teacher_id: Set(class.class_teacher_id),
            class_teacher_name: Set(class.class_teacher_name),
            subject_teachers: Set(subject_teachers),
            subjects: Set(subjects),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("创建班级失败: {e}")))?;

        self.with_students_count(result).await
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.with_students_count(model).await?)),
            None => Ok(None),
        }
    }

    /// 通过班主任获取班级
    pub async fn get_class_by_teacher_impl(&self, teacher_id: i64) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::ClassTeacherId.eq(teacher_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.with_students_count(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出班级
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Classes::find();

        // 班主任筛选
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::ClassTeacherId.eq(teacher_id));
        }

        // 排序
        select = select
            .order_by_asc(Column::ClassNumber)
            .order_by_asc(Column::Division);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级列表失败: {e}")))?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            items.push(self.with_students_count(model).await?);
        }

        Ok(ClassListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新班级信息（服务层已合并原有字段）
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        class: ClassWrite,
    ) -> Result<Option<Class>> {
        // 先检查班级是否存在
        let existing = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let (subject_teachers, subjects) = Self::encode_class_json(&class)?;

        let model = ActiveModel {
            id: Set(class_id),
            class_number: Set(class.class_number),
            division: Set(class.division),
            class_teacher_id: Set(class.class_teacher_id),
            class_teacher_name: Set(class.class_teacher_name),
            subject_teachers: Set(subject_teachers),
            subjects: Set(subjects),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("更新班级失败: {e}")))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计班级数量
    pub async fn count_classes_impl(&self) -> Result<u64> {
        Classes::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("统计班级数量失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn class(class_number: i32, division: &str, teacher: Option<i64>) -> ClassWrite {
        ClassWrite {
            class_number,
            division: division.to_string(),
            class_teacher_id: teacher,
            class_teacher_name: None,
            subject_teachers: BTreeMap::new(),
            subjects: vec!["Maths".to_string(), "Science".to_string()],
        }
    }

    #[actix_web::test]
    async fn test_create_and_fetch_class() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let created = storage.create_class_impl(class(9, "A", None)).await.unwrap();

        assert_eq!(created.name, "9A");
        assert_eq!(created.students_count, 0);
        assert_eq!(created.subjects, ["Maths", "Science"]);

        let fetched = storage.get_class_by_id_impl(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.division, "A");
        assert!(storage.get_class_by_id_impl(999).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_duplicate_number_and_division_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage.create_class_impl(class(9, "A", None)).await.unwrap();
        let err = storage
            .create_class_impl(class(9, "A", None))
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
    }

    #[actix_web::test]
    async fn test_list_orders_by_number_then_division() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        for (number, division) in [(10, "A"), (8, "B"), (8, "A")] {
            storage
                .create_class_impl(class(number, division, None))
                .await
                .unwrap();
        }

        let list = storage
            .list_classes_with_pagination_impl(ClassListQuery::default())
            .await
            .unwrap();
        let names: Vec<_> = list.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["8A", "8B", "10A"]);
        assert_eq!(storage.count_classes_impl().await.unwrap(), 3);
    }
}
