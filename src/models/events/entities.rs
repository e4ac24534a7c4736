use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    // 活动面向的对象
    #[ts(export, export_to = "../client/src/types/generated/event.ts")]
    pub enum EventAudience {
        All => "ALL",
        Class => "CLASS",
    }
}

impl Default for EventAudience {
    fn default() -> Self {
        EventAudience::All
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/event.ts")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date: chrono::NaiveDate,
    pub audience: EventAudience,
    pub class_name: Option<String>,
    pub division: Option<String>,
    pub created_by: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
