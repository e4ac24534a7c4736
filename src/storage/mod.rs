use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    attendance::{
        entities::Attendance,
        requests::{
            AttendanceListQuery, BulkAttendanceWrite, CreateAttendanceRequest,
            UpdateAttendanceRequest,
        },
        responses::{AttendanceListResponse, AttendanceSummary},
    },
    classes::{
        entities::Class,
        requests::{ClassListQuery, ClassWrite},
        responses::ClassListResponse,
    },
    events::{
        entities::Event,
        requests::{CreateEventRequest, EventListParams, UpdateEventRequest},
    },
    leaves::{
        entities::{Leave, LeaveStatus},
        requests::{LeaveListQuery, LeaveWrite},
        responses::LeaveListResponse,
    },
    marks::{
        entities::Mark,
        requests::{CreateMarkRequest, MarkListParams, UpdateMarkRequest},
        responses::MarkUpsert,
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
    },
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，password 字段须为已哈希的值
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息，password 字段须为已哈希的值
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 按角色统计用户数量
    async fn count_users_by_role(&self, role: UserRole) -> Result<u64>;
    // 列出某个班级的学生，按姓名排序
    async fn list_students_in_class(&self, class_number: i32, division: &str)
    -> Result<Vec<User>>;

    /// 班级管理方法
    async fn create_class(&self, class: ClassWrite) -> Result<Class>;
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 班主任所带的班级
    async fn get_class_by_teacher(&self, teacher_id: i64) -> Result<Option<Class>>;
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    async fn update_class(&self, class_id: i64, class: ClassWrite) -> Result<Option<Class>>;
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    async fn count_classes(&self) -> Result<u64>;

    /// 考勤管理方法
    async fn create_attendance(&self, attendance: CreateAttendanceRequest) -> Result<Attendance>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>>;
    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse>;
    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;
    // 批量考勤，整批在一个事务中完成，返回写入条数
    async fn bulk_mark_attendance(&self, batch: BulkAttendanceWrite) -> Result<usize>;
    // 学生出勤汇总
    async fn get_attendance_summary(&self, student_id: i64) -> Result<AttendanceSummary>;
    // 某班某天的考勤记录
    async fn list_class_attendance_on(
        &self,
        class_name: &str,
        division: &str,
        date: chrono::NaiveDate,
    ) -> Result<Vec<Attendance>>;
    // 某天的 (Present 数, 记录总数)
    async fn count_attendance_on(&self, date: chrono::NaiveDate) -> Result<(u64, u64)>;

    /// 请假管理方法
    async fn create_leave(&self, leave: LeaveWrite) -> Result<Leave>;
    async fn get_leave_by_id(&self, id: i64) -> Result<Option<Leave>>;
    async fn list_leaves_with_pagination(&self, query: LeaveListQuery)
    -> Result<LeaveListResponse>;
    async fn update_leave(&self, id: i64, leave: LeaveWrite) -> Result<Option<Leave>>;
    async fn update_leave_status(&self, id: i64, status: LeaveStatus) -> Result<Option<Leave>>;
    async fn delete_leave(&self, id: i64) -> Result<bool>;
    // 某班学生的待审批请假
    async fn list_pending_leaves_for_class(
        &self,
        class_number: i32,
        division: &str,
    ) -> Result<Vec<Leave>>;
    // 最新的请假记录
    async fn list_recent_leaves(&self, limit: u64) -> Result<Vec<Leave>>;

    /// 科目管理方法
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self, query: SubjectListQuery) -> Result<Vec<Subject>>;
    async fn update_subject(&self, id: i64, update: UpdateSubjectRequest)
    -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 活动管理方法
    async fn create_event(&self, event: CreateEventRequest) -> Result<Event>;
    async fn get_event_by_id(&self, id: i64) -> Result<Option<Event>>;
    async fn list_events(&self, query: EventListParams) -> Result<Vec<Event>>;
    async fn list_class_events(&self, class_name: &str) -> Result<Vec<Event>>;
    async fn update_event(&self, id: i64, update: UpdateEventRequest) -> Result<Option<Event>>;
    async fn delete_event(&self, id: i64) -> Result<bool>;
    // 最新创建的活动
    async fn list_recent_events(&self, limit: u64) -> Result<Vec<Event>>;

    /// 成绩管理方法
    // 按 学生+科目+考试类型 更新或创建
    async fn upsert_mark(&self, mark: CreateMarkRequest) -> Result<MarkUpsert>;
    async fn get_mark_by_id(&self, id: i64) -> Result<Option<Mark>>;
    async fn list_marks(&self, query: MarkListParams) -> Result<Vec<Mark>>;
    async fn update_mark(&self, id: i64, update: UpdateMarkRequest) -> Result<Option<Mark>>;
    async fn delete_mark(&self, id: i64) -> Result<bool>;
    // 某班成绩，按学生姓名、科目、考试类型排序
    async fn list_marks_by_class(&self, class_name: &str, division: &str) -> Result<Vec<Mark>>;

    /// 作业管理方法
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments(&self, query: AssignmentListParams) -> Result<Vec<Assignment>>;
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// 系统方法
    // 数据库连通性检查
    async fn ping(&self) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
