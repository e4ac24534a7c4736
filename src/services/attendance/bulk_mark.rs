use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AttendanceService;
use crate::errors::SchoolHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::AttendanceStatus,
        requests::{BulkAttendanceEntry, BulkAttendanceWrite, BulkMarkRequest},
        responses::BulkMarkResponse,
    },
};

pub async fn bulk_mark(
    service: &AttendanceService,
    request: &HttpRequest,
    data: BulkMarkRequest,
) -> ActixResult<HttpResponse> {
    let (Some(class_id), Some(date), Some(teacher_id)) = (data.class_id, data.date, data.teacher_id)
    else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "classId, date and teacherId are required",
        )));
    };
    if data.records.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "records must not be empty",
        )));
    }

    let storage = service.get_storage(request);

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => return Ok(internal_error(e)),
    };

    let teacher = match storage.get_user_by_id(teacher_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(internal_error(e)),
    };

    // 有班主任的班级只允许班主任或管理员考勤
    let allowed = class
        .class_teacher_id
        .is_none_or(|class_teacher_id| class_teacher_id == teacher.id || teacher.is_admin());
    if !allowed {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AttendancePermissionDenied,
            "Only the class teacher or an admin can mark attendance for this class",
        )));
    }

    let entries: Vec<BulkAttendanceEntry> = data
        .records
        .iter()
        .filter_map(|record| {
            record.student_id.map(|student_id| BulkAttendanceEntry {
                student_id,
                status: AttendanceStatus::from_present(record.present),
            })
        })
        .collect();

    let batch = BulkAttendanceWrite {
        date,
        teacher_id: teacher.id,
        marked_by: teacher.name,
        class_name: class.class_number.to_string(),
        division: class.division,
        entries,
    };

    match storage.bulk_mark_attendance(batch).await {
        Ok(count) => {
            info!(
                "Attendance marked for {} students of class {} on {}",
                count, class.name, date
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                BulkMarkResponse {
                    message: format!("Attendance marked successfully for {count} students"),
                    count: count as i64,
                },
                format!("Attendance marked successfully for {count} students"),
            )))
        }
        Err(SchoolHubError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, msg))),
        Err(e) => Ok(internal_error(e)),
    }
}

fn internal_error(e: SchoolHubError) -> HttpResponse {
    error!("Bulk attendance failed: {}", e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("Bulk attendance failed: {e}"),
    ))
}
