use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::DashboardService;
use crate::errors::SchoolHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    dashboard::{
        ACTIVITY_TIME_FORMAT, AdminStats, AdminStatsResponse, RecentActivity,
        attendance_rate_label,
    },
    users::entities::UserRole,
};

/// 最近动态中的请假条数
const RECENT_LEAVES: u64 = 3;
/// 最近动态中的活动条数
const RECENT_EVENTS: u64 = 2;

pub async fn admin_stats(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let today = chrono::Utc::now().date_naive();

    let loaded = async {
        let students = storage.count_users_by_role(UserRole::Student).await?;
        let teachers = storage.count_users_by_role(UserRole::Teacher).await?;
        let classes = storage.count_classes().await?;
        let (present, total) = storage.count_attendance_on(today).await?;
        let leaves = storage.list_recent_leaves(RECENT_LEAVES).await?;
        let events = storage.list_recent_events(RECENT_EVENTS).await?;
        Ok::<_, SchoolHubError>((students, teachers, classes, present, total, leaves, events))
    }
    .await;

    let (students, teachers, classes, present, total, leaves, events) = match loaded {
        Ok(parts) => parts,
        Err(e) => {
            error!("Failed to load admin stats: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load admin stats: {e}"),
                )),
            );
        }
    };

    let mut recent_activity: Vec<RecentActivity> = leaves
        .into_iter()
        .map(|leave| RecentActivity {
            text: format!(
                "Leave request from {}",
                leave.student_name.as_deref().unwrap_or("Unknown")
            ),
            time: leave.created_at.format(ACTIVITY_TIME_FORMAT).to_string(),
        })
        .collect();
    recent_activity.extend(events.into_iter().map(|event| RecentActivity {
        text: format!("New event: {}", event.title),
        time: event.created_at.format(ACTIVITY_TIME_FORMAT).to_string(),
    }));

    let response = AdminStatsResponse {
        stats: AdminStats {
            students: students as i64,
            teachers: teachers as i64,
            classes: classes as i64,
            attendance_today: attendance_rate_label(present, total),
        },
        recent_activity,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Admin stats retrieved successfully",
    )))
}
