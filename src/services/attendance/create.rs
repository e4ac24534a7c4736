use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode, attendance::requests::CreateAttendanceRequest};

pub async fn create_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    mut data: CreateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_user_by_id(data.student_id).await {
        Ok(Some(user)) if user.is_student() => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(internal_error(e)),
    }

    let teacher = match storage.get_user_by_id(data.teacher_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(internal_error(e)),
    };

    if data
        .marked_by
        .as_deref()
        .is_none_or(|m| m.trim().is_empty())
    {
        data.marked_by = Some(teacher.name);
    }

    match storage.create_attendance(data).await {
        Ok(attendance) => Ok(HttpResponse::Created().json(ApiResponse::success(
            attendance,
            "Attendance created successfully",
        ))),
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::AttendanceAlreadyMarked,
                "Attendance already marked for this student on this date",
            ),
        )),
        Err(e) => Ok(internal_error(e)),
    }
}

fn internal_error(e: crate::errors::SchoolHubError) -> HttpResponse {
    error!("Attendance creation failed: {}", e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("Attendance creation failed: {e}"),
    ))
}
