//! 活动实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub date: Date,
    pub audience: String,
    pub class_name: Option<String>,
    pub division: Option<String>,
    pub created_by: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_event(self) -> crate::models::events::entities::Event {
        use crate::models::events::entities::{Event, EventAudience};
        use chrono::{DateTime, Utc};

        Event {
            id: self.id,
            title: self.title,
            description: self.description,
            date: self.date,
            audience: self
                .audience
                .parse::<EventAudience>()
                .unwrap_or(EventAudience::All),
            class_name: self.class_name,
            division: self.division,
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
