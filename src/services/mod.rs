pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod events;
pub mod leaves;
pub mod marks;
pub mod subjects;
pub mod system;
pub mod users;

pub use assignments::AssignmentService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use dashboard::DashboardService;
pub use events::EventService;
pub use leaves::LeaveService;
pub use marks::MarkService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use users::UserService;
