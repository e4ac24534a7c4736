use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode, attendance::requests::UpdateAttendanceRequest};

pub async fn update_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    id: i64,
    data: UpdateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_attendance(id, data).await {
        Ok(Some(attendance)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            attendance,
            "Attendance updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        ))),
        // 改日期后与同一学生的另一条记录冲突
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::AttendanceAlreadyMarked,
                "Attendance already marked for this student on this date",
            ),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update attendance record: {e}"),
            )),
        ),
    }
}
