//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_number: i32,
    pub division: String,
    #[sea_orm(unique)]
    pub class_teacher_id: Option<i64>,
    pub class_teacher_name: Option<String>,
    // JSON 对象：科目名 -> 教师ID
    #[sea_orm(column_type = "Text")]
    pub subject_teachers: String,
    // JSON 数组：科目名
    #[sea_orm(column_type = "Text")]
    pub subjects: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClassTeacherId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    ClassTeacher,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassTeacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 班级名称，如 "9A"
    pub fn label(&self) -> String {
        crate::utils::class_label::class_label(self.class_number, &self.division)
    }

    pub fn into_class(self, students_count: i64) -> crate::models::classes::entities::Class {
        use crate::models::classes::entities::Class;
        use chrono::{DateTime, Utc};

        let name = self.label();

        Class {
            id: self.id,
            class_number: self.class_number,
            division: self.division,
            name,
            class_teacher_id: self.class_teacher_id,
            class_teacher_name: self.class_teacher_name,
            subject_teachers: serde_json::from_str(&self.subject_teachers).unwrap_or_default(),
            subjects: serde_json::from_str(&self.subjects).unwrap_or_default(),
            students_count,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
