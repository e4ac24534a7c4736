use serde::Serialize;
use ts_rs::TS;

use super::entities::{Class, TeachingClass};
use crate::models::attendance::entities::Attendance;
use crate::models::common::PaginatedResponse;
use crate::models::events::entities::Event;
use crate::models::leaves::entities::Leave;
use crate::models::marks::entities::Mark;
use crate::models::subjects::entities::Subject;
use crate::models::users::entities::User;

// 班级列表响应
pub type ClassListResponse = PaginatedResponse<Class>;

// 班级学生名单
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/class.ts")]
pub struct ClassStudentsResponse {
    pub class: String,
    pub students: Vec<User>,
}

// 班主任看板
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/class.ts")]
pub struct TeacherDashboardResponse {
    pub class: Class,
    pub teacher: User,
    pub students: Vec<User>,
    pub attendance_today: Vec<Attendance>,
    pub pending_leaves: Vec<Leave>,
    pub events: Vec<Event>,
    pub subjects: Vec<Subject>,
    pub total_students: i64,
    pub present_today: i64,
    pub absent_today: i64,
}

// 科目教师看板
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/class.ts")]
pub struct SubjectTeacherDashboardResponse {
    pub teacher: User,
    pub classes: Vec<TeachingClass>,
    pub current_class: Option<TeachingClass>,
    pub students: Vec<User>,
    pub marks: Vec<Mark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
