use serde::Deserialize;
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, deserialize_optional_i64, deserialize_some};

// 班级列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/class.ts")]
pub struct ClassListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(
        rename = "teacherId",
        alias = "teacher_id",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub teacher_id: Option<i64>,
}

// 班级列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ClassListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
}

// 创建班级请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub class_number: i32,
    pub division: String,
    #[serde(alias = "class_teacher", alias = "teacherId")]
    pub class_teacher_id: Option<i64>,
    #[serde(default)]
    pub subject_teachers: BTreeMap<String, i64>,
    #[serde(default)]
    pub subjects: Vec<String>,
}

// 更新班级请求；class_teacher_id 显式为 null 时解除班主任
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub class_number: Option<i32>,
    pub division: Option<String>,
    #[serde(
        alias = "class_teacher",
        alias = "teacherId",
        default,
        deserialize_with = "deserialize_some"
    )]
    #[ts(type = "number | null")]
    pub class_teacher_id: Option<Option<i64>>,
    pub subject_teachers: Option<BTreeMap<String, i64>>,
    pub subjects: Option<Vec<String>>,
}

/// 存储层使用的完整班级写入数据，班主任姓名由服务层解析
#[derive(Debug, Clone)]
pub struct ClassWrite {
    pub class_number: i32,
    pub division: String,
    pub class_teacher_id: Option<i64>,
    pub class_teacher_name: Option<String>,
    pub subject_teachers: BTreeMap<String, i64>,
    pub subjects: Vec<String>,
}

// 按教师查询
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/class.ts")]
pub struct TeacherQuery {
    #[serde(
        alias = "teacherId",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub teacher_id: Option<i64>,
}

// 科目教师看板查询
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/class.ts")]
pub struct SubjectDashboardQuery {
    #[serde(
        alias = "teacherId",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub teacher_id: Option<i64>,
    #[serde(
        alias = "classId",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[ts(type = "number | null")]
    pub class_id: Option<i64>,
}
