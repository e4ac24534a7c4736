//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "marks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject: String,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub percentage: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub class_name: Option<String>,
    pub division: Option<String>,
    pub teacher_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    Teacher,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_mark(
        self,
        student: Option<&super::users::Model>,
        teacher: Option<&super::users::Model>,
    ) -> crate::models::marks::entities::Mark {
        use crate::models::marks::entities::Mark;
        use chrono::{DateTime, Utc};

        Mark {
            id: self.id,
            student_id: self.student_id,
            student_name: student.map(|s| s.name.clone()),
            subject_name: self.subject.clone(),
            subject: self.subject,
            exam_type: self.exam_type,
            marks_obtained: self.marks_obtained,
            total_marks: self.total_marks,
            percentage: self.percentage,
            remarks: self.remarks,
            class_name: self.class_name,
            division: self.division,
            teacher_id: self.teacher_id,
            teacher_name: teacher.map(|t| t.name.clone()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
