//! 请假实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "leaves")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub reason: String,
    pub start_date: Date,
    pub end_date: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub details: Option<String>,
    pub status: String,
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
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_leave(
        self,
        student: Option<&super::users::Model>,
    ) -> crate::models::leaves::entities::Leave {
        use crate::models::leaves::entities::{Leave, LeaveStatus};
        use chrono::{DateTime, Utc};

        Leave {
            id: self.id,
            student_id: self.student_id,
            student_name: student.map(|s| s.name.clone()),
            class_name: student.and_then(|s| s.class_name.clone()),
            division: student.and_then(|s| s.division.clone()),
            reason: self.reason,
            start_date: self.start_date,
            end_date: self.end_date,
            details: self.details,
            status: self
                .status
                .parse::<LeaveStatus>()
                .unwrap_or(LeaveStatus::Pending),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
