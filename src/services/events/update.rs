use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::{
    ApiResponse, ErrorCode,
    events::requests::{CreateEventRequest, UpdateEventRequest},
};

pub async fn update_event(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
    data: UpdateEventRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_event_by_id(id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EventNotFound,
                "Event not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get event: {e}"),
                )),
            );
        }
    };

    // 用合并后的结果做同样的校验
    let merged = CreateEventRequest {
        title: data.title.clone().unwrap_or(existing.title),
        description: None,
        date: data.date.unwrap_or(existing.date),
        audience: data.audience.unwrap_or(existing.audience),
        class_name: data.class_name.clone().or(existing.class_name),
        division: None,
        created_by: None,
    };
    if let Err(msg) = merged.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::EventInvalid, msg)));
    }

    match storage.update_event(id, data).await {
        Ok(Some(event)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            event,
            "Event updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EventNotFound,
            "Event not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update event: {e}"),
            )),
        ),
    }
}
