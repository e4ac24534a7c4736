use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassService;
use crate::errors::SchoolHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::entities::AttendanceStatus,
    classes::{requests::TeacherQuery, responses::TeacherDashboardResponse},
    subjects::requests::SubjectListQuery,
};

pub async fn teacher_dashboard(
    service: &ClassService,
    request: &HttpRequest,
    query: TeacherQuery,
) -> ActixResult<HttpResponse> {
    let Some(teacher_id) = query.teacher_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "teacher_id is required",
        )));
    };

    let storage = service.get_storage(request);

    let teacher = match storage.get_user_by_id(teacher_id).await {
        Ok(Some(user)) if user.is_teacher() => user,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(dashboard_error(e)),
    };

    let class = match storage.get_class_by_teacher(teacher_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "No class assigned to this teacher",
            )));
        }
        Err(e) => return Ok(dashboard_error(e)),
    };

    let class_number = class.class_number.to_string();
    let today = chrono::Utc::now().date_naive();

    let loaded = async {
        let students = storage
            .list_students_in_class(class.class_number, &class.division)
            .await?;
        let attendance_today = storage
            .list_class_attendance_on(&class_number, &class.division, today)
            .await?;
        let pending_leaves = storage
            .list_pending_leaves_for_class(class.class_number, &class.division)
            .await?;
        let events = storage.list_class_events(&class_number).await?;
        let subjects = storage
            .list_subjects(SubjectListQuery {
                class_name: Some(class.name.clone()),
                teacher_id: None,
            })
            .await?;
        Ok::<_, SchoolHubError>((students, attendance_today, pending_leaves, events, subjects))
    }
    .await;

    let (students, attendance_today, pending_leaves, events, subjects) = match loaded {
        Ok(parts) => parts,
        Err(e) => return Ok(dashboard_error(e)),
    };

    let present_today = attendance_today
        .iter()
        .filter(|a| a.status == AttendanceStatus::Present)
        .count() as i64;
    let absent_today = attendance_today
        .iter()
        .filter(|a| a.status == AttendanceStatus::Absent)
        .count() as i64;

    let response = TeacherDashboardResponse {
        total_students: students.len() as i64,
        class,
        teacher,
        students,
        attendance_today,
        pending_leaves,
        events,
        subjects,
        present_today,
        absent_today,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Teacher dashboard retrieved successfully",
    )))
}

fn dashboard_error(e: SchoolHubError) -> HttpResponse {
    error!("Failed to load teacher dashboard: {}", e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("Failed to load teacher dashboard: {e}"),
    ))
}
