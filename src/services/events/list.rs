use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::{ApiResponse, ErrorCode, events::requests::EventListParams};

pub async fn list_events(
    service: &EventService,
    request: &HttpRequest,
    query: EventListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_events(query).await {
        Ok(events) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            events,
            "Event list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve event list: {e}"),
            )),
        ),
    }
}
