use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LeaveService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_leave(
    service: &LeaveService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_leave_by_id(id).await {
        Ok(Some(leave)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            leave,
            "Leave retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LeaveNotFound,
            "Leave not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get leave: {e}"),
            )),
        ),
    }
}
