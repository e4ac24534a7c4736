use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    // 请假审批状态
    #[ts(export, export_to = "../client/src/types/generated/leave.ts")]
    pub enum LeaveStatus {
        Pending => "Pending",
        Approved => "Approved",
        Rejected => "Rejected",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/leave.ts")]
pub struct Leave {
    pub id: i64,
    pub student_id: i64,
    // 以下三项取自学生账号
    pub student_name: Option<String>,
    pub class_name: Option<String>,
    pub division: Option<String>,
    pub reason: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub details: Option<String>,
    pub status: LeaveStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
