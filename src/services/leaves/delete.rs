use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LeaveService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_leave(
    service: &LeaveService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_leave(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Leave deleted successfully"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LeaveNotFound,
            "Leave not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete leave: {e}"),
            )),
        ),
    }
}
