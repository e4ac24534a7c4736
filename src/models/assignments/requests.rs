use serde::Deserialize;
use ts_rs::TS;

use super::entities::AssignmentStatus;
use crate::models::common::deserialize_optional_i64;

// 作业列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(alias = "className")]
    pub class_name: Option<String>,
    pub division: Option<String>,
    #[serde(
        alias = "subject_id",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub subject: Option<i64>,
    #[serde(
        alias = "teacher_id",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub teacher: Option<i64>,
    pub status: Option<AssignmentStatus>,
}

// 创建作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: chrono::NaiveDate,
    pub class_name: String,
    pub division: Option<String>,
    #[serde(alias = "subject")]
    pub subject_id: Option<i64>,
    #[serde(alias = "teacher")]
    pub teacher_id: i64,
    #[serde(default)]
    pub status: AssignmentStatus,
}

// 更新作业请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<chrono::NaiveDate>,
    pub class_name: Option<String>,
    pub division: Option<String>,
    #[serde(alias = "subject")]
    pub subject_id: Option<i64>,
    #[serde(alias = "teacher")]
    pub teacher_id: Option<i64>,
    pub status: Option<AssignmentStatus>,
}
