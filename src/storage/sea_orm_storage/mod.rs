//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod attendances;
mod classes;
mod events;
mod leaves;
mod marks;
mod subjects;
mod users;

use crate::config::AppConfig;
use crate::entity::users::{Column as UserColumn, Entity as Users, Model as UserModel};
use crate::errors::{Result, SchoolHubError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    QueryFilter,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config.database.pool_size, config.database.timeout)
                .await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 批量加载用户，用于填充派生的姓名字段
    pub(crate) async fn load_users_map<C, I>(db: &C, ids: I) -> Result<HashMap<i64, UserModel>>
    where
        C: ConnectionTrait,
        I: IntoIterator<Item = i64>,
    {
        let mut ids: Vec<i64> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = Users::find()
            .filter(UserColumn::Id.is_in(ids))
            .all(db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("批量查询用户失败: {e}")))?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}

#[cfg(test)]
impl SeaOrmStorage {
    /// 单连接内存数据库，已执行迁移
    pub(crate) async fn new_in_memory() -> Result<Self> {
        let db = Self::connect_sqlite("sqlite::memory:", 1, 5).await?;
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self { db })
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users_by_role(&self, role: UserRole) -> Result<u64> {
        self.count_users_by_role_impl(role).await
    }

    async fn list_students_in_class(
        &self,
        class_number: i32,
        division: &str,
    ) -> Result<Vec<User>> {
        self.list_students_in_class_impl(class_number, division)
            .await
    }

    // 班级模块
    async fn create_class(&self, class: ClassWrite) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_by_teacher(&self, teacher_id: i64) -> Result<Option<Class>> {
        self.get_class_by_teacher_impl(teacher_id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(&self, class_id: i64, class: ClassWrite) -> Result<Option<Class>> {
        self.update_class_impl(class_id, class).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    async fn count_classes(&self) -> Result<u64> {
        self.count_classes_impl().await
    }

    // 考勤模块
    async fn create_attendance(&self, attendance: CreateAttendanceRequest) -> Result<Attendance> {
        self.create_attendance_impl(attendance).await
    }

    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>> {
        self.get_attendance_by_id_impl(id).await
    }

    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        self.list_attendance_with_pagination_impl(query).await
    }

    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        self.update_attendance_impl(id, update).await
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    async fn bulk_mark_attendance(&self, batch: BulkAttendanceWrite) -> Result<usize> {
        self.bulk_mark_attendance_impl(batch).await
    }

    async fn get_attendance_summary(&self, student_id: i64) -> Result<AttendanceSummary> {
        self.get_attendance_summary_impl(student_id).await
    }

    async fn list_class_attendance_on(
        &self,
        class_name: &str,
        division: &str,
        date: chrono::NaiveDate,
    ) -> Result<Vec<Attendance>> {
        self.list_class_attendance_on_impl(class_name, division, date)
            .await
    }

    async fn count_attendance_on(&self, date: chrono::NaiveDate) -> Result<(u64, u64)> {
        self.count_attendance_on_impl(date).await
    }

    // 请假模块
    async fn create_leave(&self, leave: LeaveWrite) -> Result<Leave> {
        self.create_leave_impl(leave).await
    }

    async fn get_leave_by_id(&self, id: i64) -> Result<Option<Leave>> {
        self.get_leave_by_id_impl(id).await
    }

    async fn list_leaves_with_pagination(
        &self,
        query: LeaveListQuery,
    ) -> Result<LeaveListResponse> {
        self.list_leaves_with_pagination_impl(query).await
    }

    async fn update_leave(&self, id: i64, leave: LeaveWrite) -> Result<Option<Leave>> {
        self.update_leave_impl(id, leave).await
    }

    async fn update_leave_status(&self, id: i64, status: LeaveStatus) -> Result<Option<Leave>> {
        self.update_leave_status_impl(id, status).await
    }

    async fn delete_leave(&self, id: i64) -> Result<bool> {
        self.delete_leave_impl(id).await
    }

    async fn list_pending_leaves_for_class(
        &self,
        class_number: i32,
        division: &str,
    ) -> Result<Vec<Leave>> {
        self.list_pending_leaves_for_class_impl(class_number, division)
            .await
    }

    async fn list_recent_leaves(&self, limit: u64) -> Result<Vec<Leave>> {
        self.list_recent_leaves_impl(limit).await
    }

    // 科目模块
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self, query: SubjectListQuery) -> Result<Vec<Subject>> {
        self.list_subjects_impl(query).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 活动模块
    async fn create_event(&self, event: CreateEventRequest) -> Result<Event> {
        self.create_event_impl(event).await
    }

    async fn get_event_by_id(&self, id: i64) -> Result<Option<Event>> {
        self.get_event_by_id_impl(id).await
    }

    async fn list_events(&self, query: EventListParams) -> Result<Vec<Event>> {
        self.list_events_impl(query).await
    }

    async fn list_class_events(&self, class_name: &str) -> Result<Vec<Event>> {
        self.list_class_events_impl(class_name).await
    }

    async fn update_event(&self, id: i64, update: UpdateEventRequest) -> Result<Option<Event>> {
        self.update_event_impl(id, update).await
    }

    async fn delete_event(&self, id: i64) -> Result<bool> {
        self.delete_event_impl(id).await
    }

    async fn list_recent_events(&self, limit: u64) -> Result<Vec<Event>> {
        self.list_recent_events_impl(limit).await
    }

    // 成绩模块
    async fn upsert_mark(&self, mark: CreateMarkRequest) -> Result<MarkUpsert> {
        self.upsert_mark_impl(mark).await
    }

    async fn get_mark_by_id(&self, id: i64) -> Result<Option<Mark>> {
        self.get_mark_by_id_impl(id).await
    }

    async fn list_marks(&self, query: MarkListParams) -> Result<Vec<Mark>> {
        self.list_marks_impl(query).await
    }

    async fn update_mark(&self, id: i64, update: UpdateMarkRequest) -> Result<Option<Mark>> {
        self.update_mark_impl(id, update).await
    }

    async fn delete_mark(&self, id: i64) -> Result<bool> {
        self.delete_mark_impl(id).await
    }

    async fn list_marks_by_class(&self, class_name: &str, division: &str) -> Result<Vec<Mark>> {
        self.list_marks_by_class_impl(class_name, division).await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments(&self, query: AssignmentListParams) -> Result<Vec<Assignment>> {
        self.list_assignments_impl(query).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 系统
    async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| SchoolHubError::database_connection(format!("数据库不可用: {e}")))
    }
}
