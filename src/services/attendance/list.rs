use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::requests::{AttendanceListParams, AttendanceListQuery},
};

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = AttendanceListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        student_id: query.student,
        date: query.date,
        class_name: query.class_name,
        division: query.division,
    };

    match storage.list_attendance_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Attendance list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve attendance list: {e}"),
            )),
        ),
    }
}
