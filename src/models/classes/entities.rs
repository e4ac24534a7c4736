use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

/// 允许的年级
pub const CLASS_NUMBERS: std::ops::RangeInclusive<i32> = 8..=10;

/// 允许的分班
pub const DIVISIONS: [&str; 3] = ["A", "B", "C"];

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/class.ts")]
pub struct Class {
    pub id: i64,
    // 年级 8..=10
    pub class_number: i32,
    // 分班 A/B/C
    pub division: String,
    // 展示名称，如 "9A"
    pub name: String,
    pub class_teacher_id: Option<i64>,
    pub class_teacher_name: Option<String>,
    // 科目名 -> 任课教师ID
    pub subject_teachers: BTreeMap<String, i64>,
    pub subjects: Vec<String>,
    // 该年级分班下的学生人数
    pub students_count: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 科目教师视角下的任教班级
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/class.ts")]
pub struct TeachingClass {
    pub id: i64,
    pub name: String,
    pub class_number: i32,
    pub division: String,
    // 该教师在此班级任教的科目
    pub subject: String,
}
