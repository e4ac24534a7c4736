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

pub use assignments::configure_assignment_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use dashboard::configure_dashboard_routes;
pub use events::configure_event_routes;
pub use leaves::configure_leave_routes;
pub use marks::configure_mark_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部业务路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_dashboard_routes)
        .configure(configure_user_routes)
        .configure(configure_classes_routes)
        .configure(configure_attendance_routes)
        .configure(configure_leave_routes)
        .configure(configure_subject_routes)
        .configure(configure_event_routes)
        .configure(configure_mark_routes)
        .configure(configure_assignment_routes)
        .configure(configure_system_routes);
}

#[cfg(test)]
mod tests;
