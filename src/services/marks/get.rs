use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_mark(
    service: &MarkService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_mark_by_id(id).await {
        Ok(Some(mark)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            mark,
            "Mark retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MarkNotFound,
            "Mark not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get mark: {e}"),
            )),
        ),
    }
}
