use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EventService;
use crate::models::{ApiResponse, ErrorCode, events::requests::CreateEventRequest};

pub async fn create_event(
    service: &EventService,
    request: &HttpRequest,
    data: CreateEventRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = data.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::EventInvalid, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_event(data).await {
        Ok(event) => {
            info!("Event {} created: {}", event.id, event.title);
            Ok(HttpResponse::Created().json(ApiResponse::success(event, "Event created successfully")))
        }
        Err(e) => {
            error!("Event creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Event creation failed: {e}"),
                )),
            )
        }
    }
}
