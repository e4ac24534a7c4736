use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_mark(
    service: &MarkService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_mark(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Mark deleted successfully"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MarkNotFound,
            "Mark not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete mark: {e}"),
            )),
        ),
    }
}
