use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::events::requests::{CreateEventRequest, EventListParams, UpdateEventRequest};
use crate::services::EventService;
use crate::utils::SafeIDI64;

static EVENT_SERVICE: Lazy<EventService> = Lazy::new(EventService::new_lazy);

pub async fn list_events(
    req: HttpRequest,
    query: web::Query<EventListParams>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.list_events(&req, query.into_inner()).await
}

pub async fn create_event(
    req: HttpRequest,
    data: web::Json<CreateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.create_event(&req, data.into_inner()).await
}

pub async fn get_event(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.get_event(&req, id.0).await
}

pub async fn update_event(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .update_event(&req, id.0, data.into_inner())
        .await
}

pub async fn delete_event(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.delete_event(&req, id.0).await
}

// 配置路由
pub fn configure_event_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/events")
            .route("", web::get().to(list_events))
            .route("", web::post().to(create_event))
            .route("/{id}", web::get().to(get_event))
            .route("/{id}", web::put().to(update_event))
            .route("/{id}", web::patch().to(update_event))
            .route("/{id}", web::delete().to(delete_event)),
    );
}
