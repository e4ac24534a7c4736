use serde::Deserialize;
use ts_rs::TS;

use super::entities::LeaveStatus;
use crate::models::common::{PaginationQuery, deserialize_optional_i64};

// 请假列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/leave.ts")]
pub struct LeaveListParams {
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
    pub status: Option<LeaveStatus>,
    #[serde(
        alias = "classId",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub class_id: Option<i64>,
}

// 请假列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct LeaveListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<LeaveStatus>,
    // 已由服务层将 class_id 解析为年级与分班
    pub class_number: Option<i32>,
    pub division: Option<String>,
}

// 创建请假 / 整体替换请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/leave.ts")]
pub struct CreateLeaveRequest {
    #[serde(
        alias = "student",
        alias = "studentId",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub student_id: Option<i64>,
    pub reason: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub details: Option<String>,
    pub status: Option<LeaveStatus>,
}

// 请假部分更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/leave.ts")]
pub struct UpdateLeaveRequest {
    #[serde(
        alias = "student",
        alias = "studentId",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub student_id: Option<i64>,
    pub reason: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub details: Option<String>,
    pub status: Option<LeaveStatus>,
}

/// 存储层写入的完整请假数据，学生与日期已由服务层校验
#[derive(Debug, Clone)]
pub struct LeaveWrite {
    pub student_id: i64,
    pub reason: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub details: Option<String>,
    pub status: LeaveStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_accepts_student_alias() {
        let req: CreateLeaveRequest = serde_json::from_str(
            r#"{"student":4,"reason":"Fever","start_date":"2025-03-01","end_date":"2025-03-03"}"#,
        )
        .unwrap();
        assert_eq!(req.student_id, Some(4));
        assert!(req.status.is_none());
    }
}
