use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::models::common::{PaginationQuery, deserialize_optional_i64};

// 考勤列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/attendance.ts")]
pub struct AttendanceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(
        alias = "student_id",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub student: Option<i64>,
    pub date: Option<chrono::NaiveDate>,
    #[serde(rename = "className", alias = "class_name")]
    pub class_name: Option<String>,
    pub division: Option<String>,
}

// 考勤列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AttendanceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub date: Option<chrono::NaiveDate>,
    pub class_name: Option<String>,
    pub division: Option<String>,
}

// 单条考勤创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/attendance.ts")]
pub struct CreateAttendanceRequest {
    #[serde(alias = "student", alias = "studentId")]
    pub student_id: i64,
    #[serde(alias = "teacher", alias = "teacherId")]
    pub teacher_id: i64,
    pub date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    pub class_name: String,
    pub division: Option<String>,
    // 缺省时使用教师姓名
    pub marked_by: Option<String>,
}

// 考勤更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub date: Option<chrono::NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub class_name: Option<String>,
    pub division: Option<String>,
    pub marked_by: Option<String>,
}

// 批量考勤中的单个学生
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/attendance.ts")]
pub struct BulkAttendanceRecord {
    #[serde(
        rename = "studentId",
        alias = "student_id",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub present: bool,
}

// 批量考勤请求，缺失字段由服务层返回 400
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/attendance.ts")]
pub struct BulkMarkRequest {
    #[serde(
        rename = "classId",
        alias = "class_id",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub date: Option<chrono::NaiveDate>,
    #[serde(
        rename = "teacherId",
        alias = "teacher_id",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub records: Vec<BulkAttendanceRecord>,
}

/// 存储层批量写入的一行
#[derive(Debug, Clone)]
pub struct BulkAttendanceEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
}

/// 存储层批量写入参数，班级与教师已由服务层校验
#[derive(Debug, Clone)]
pub struct BulkAttendanceWrite {
    pub date: chrono::NaiveDate,
    pub teacher_id: i64,
    pub marked_by: String,
    pub class_name: String,
    pub division: String,
    pub entries: Vec<BulkAttendanceEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_request_tolerates_missing_fields() {
        let req: BulkMarkRequest = serde_json::from_str(
            r#"{"classId":"3","date":"2025-03-10","records":[{"studentId":5,"present":true},{"present":false}]}"#,
        )
        .unwrap();
        assert_eq!(req.class_id, Some(3));
        assert_eq!(req.teacher_id, None);
        assert_eq!(req.records.len(), 2);
        assert_eq!(req.records[0].student_id, Some(5));
        assert_eq!(req.records[1].student_id, None);
        assert!(!req.records[1].present);
    }
}
