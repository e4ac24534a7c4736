use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::deserialize_optional_i64;

// 成绩列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/mark.ts")]
pub struct MarkListParams {
    #[serde(
        alias = "student",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub student_id: Option<i64>,
    #[serde(alias = "className")]
    pub class_name: Option<String>,
    pub division: Option<String>,
    pub subject: Option<String>,
    pub exam_type: Option<String>,
}

// 按班级查询成绩
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/mark.ts")]
pub struct MarksByClassQuery {
    #[serde(
        alias = "classId",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub class_id: Option<i64>,
}

// 录入成绩请求（按 学生+科目+考试类型 更新或创建）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/mark.ts")]
pub struct CreateMarkRequest {
    #[serde(alias = "student", alias = "studentId")]
    pub student_id: i64,
    pub subject: String,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub remarks: Option<String>,
    pub class_name: Option<String>,
    pub division: Option<String>,
    #[serde(alias = "teacher", alias = "teacherId")]
    pub teacher_id: Option<i64>,
}

// 更新成绩请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/mark.ts")]
pub struct UpdateMarkRequest {
    pub subject: Option<String>,
    pub exam_type: Option<String>,
    pub marks_obtained: Option<f64>,
    pub total_marks: Option<f64>,
    pub remarks: Option<String>,
    pub class_name: Option<String>,
    pub division: Option<String>,
    #[serde(alias = "teacher", alias = "teacherId")]
    pub teacher_id: Option<i64>,
}
