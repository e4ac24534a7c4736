use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    // 作业状态
    #[ts(export, export_to = "../client/src/types/generated/assignment.ts")]
    pub enum AssignmentStatus {
        Active => "Active",
        Closed => "Closed",
    }
}

impl Default for AssignmentStatus {
    fn default() -> Self {
        AssignmentStatus::Active
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: chrono::NaiveDate,
    pub class_name: String,
    pub division: Option<String>,
    pub subject_id: Option<i64>,
    pub subject_name: Option<String>,
    pub teacher_id: i64,
    pub teacher_name: Option<String>,
    pub status: AssignmentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
