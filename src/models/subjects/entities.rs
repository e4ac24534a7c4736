use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    // 所属班级，如 "9A"
    pub class_name: Option<String>,
    // 任课教师
    pub class_teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
