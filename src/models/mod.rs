//! 数据模型定义
//!
//! 业务实体、请求与响应结构。`entity` 模块中的数据库模型通过 `into_xxx()` 转换为这里的实体。

#[macro_use]
mod macros;

pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod dashboard;
pub mod events;
pub mod leaves;
pub mod marks;
pub mod subjects;
pub mod system;
pub mod users;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码，写入响应体的 `code` 字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    InvalidUserType = 2001,
    AccountDisabled = 2002,
    RegisterFailed = 2003,

    // 用户
    UserNotFound = 2100,
    UserEmailInvalid = 2101,
    UserEmailAlreadyExists = 2102,
    UserNameInvalid = 2103,
    UserPasswordInvalid = 2104,
    UserCreationFailed = 2105,
    UserUpdateFailed = 2106,
    UserDeleteFailed = 2107,

    // 班级
    ClassNotFound = 3000,
    ClassAlreadyExists = 3001,
    ClassInvalid = 3002,
    ClassTeacherNotFound = 3003,
    ClassTeacherAlreadyAssigned = 3004,
    SubjectTeacherInvalid = 3005,

    // 考勤
    AttendanceNotFound = 4000,
    AttendanceAlreadyMarked = 4001,
    AttendancePermissionDenied = 4002,

    // 请假
    LeaveNotFound = 5000,
    LeaveInvalid = 5001,

    // 科目
    SubjectNotFound = 6000,
    SubjectInvalid = 6001,

    // 活动
    EventNotFound = 7000,
    EventInvalid = 7001,

    // 成绩
    MarkNotFound = 8000,
    MarkInvalid = 8001,

    // 作业
    AssignmentNotFound = 9000,
    AssignmentInvalid = 9001,
}
