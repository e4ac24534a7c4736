use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    // 考勤状态
    #[ts(export, export_to = "../client/src/types/generated/attendance.ts")]
    pub enum AttendanceStatus {
        Present => "Present",
        Absent => "Absent",
    }
}

impl AttendanceStatus {
    pub fn from_present(present: bool) -> Self {
        if present {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Absent
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/attendance.ts")]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub teacher_id: i64,
    pub date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    // 年级，如 "9"
    pub class_name: String,
    pub division: Option<String>,
    pub marked_by: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
