use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::models::{ApiResponse, ErrorCode, marks::requests::MarkListParams};

pub async fn list_marks(
    service: &MarkService,
    request: &HttpRequest,
    query: MarkListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_marks(query).await {
        Ok(marks) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            marks,
            "Mark list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve mark list: {e}"),
            )),
        ),
    }
}
