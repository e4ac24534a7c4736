use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{deserialize_optional_i64, deserialize_some};

// 科目列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/subject.ts")]
pub struct SubjectListParams {
    #[serde(rename = "className", alias = "class_name")]
    pub class_name: Option<String>,
    #[serde(
        alias = "classId",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub class_id: Option<i64>,
    #[serde(
        alias = "teacherId",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub teacher_id: Option<i64>,
}

// 科目列表查询参数（用于存储层），class_id 已解析为 "9A" 形式
#[derive(Debug, Clone, Default)]
pub struct SubjectListQuery {
    pub class_name: Option<String>,
    pub teacher_id: Option<i64>,
}

// 创建科目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub class_name: Option<String>,
    #[serde(alias = "class_teacher", alias = "teacherId", alias = "teacher_id")]
    pub class_teacher_id: Option<i64>,
}

// 更新科目请求；class_teacher_id 显式为 null 时解除任课教师
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub class_name: Option<String>,
    #[serde(
        alias = "class_teacher",
        alias = "teacherId",
        alias = "teacher_id",
        default,
        deserialize_with = "deserialize_some"
    )]
    #[ts(type = "number | null")]
    pub class_teacher_id: Option<Option<i64>>,
}
