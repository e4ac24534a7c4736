use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::leaves::{
    entities::LeaveStatus,
    requests::{CreateLeaveRequest, LeaveListParams, UpdateLeaveRequest},
};
use crate::services::LeaveService;
use crate::utils::SafeIDI64;

static LEAVE_SERVICE: Lazy<LeaveService> = Lazy::new(LeaveService::new_lazy);

pub async fn list_leaves(
    req: HttpRequest,
    query: web::Query<LeaveListParams>,
) -> ActixResult<HttpResponse> {
    LEAVE_SERVICE.list_leaves(&req, query.into_inner()).await
}

pub async fn create_leave(
    req: HttpRequest,
    data: web::Json<CreateLeaveRequest>,
) -> ActixResult<HttpResponse> {
    LEAVE_SERVICE.create_leave(&req, data.into_inner()).await
}

pub async fn get_leave(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LEAVE_SERVICE.get_leave(&req, id.0).await
}

pub async fn replace_leave(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<CreateLeaveRequest>,
) -> ActixResult<HttpResponse> {
    LEAVE_SERVICE
        .replace_leave(&req, id.0, data.into_inner())
        .await
}

pub async fn partial_update_leave(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateLeaveRequest>,
) -> ActixResult<HttpResponse> {
    LEAVE_SERVICE
        .partial_update_leave(&req, id.0, data.into_inner())
        .await
}

pub async fn delete_leave(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LEAVE_SERVICE.delete_leave(&req, id.0).await
}

pub async fn approve_leave(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LEAVE_SERVICE
        .set_leave_status(&req, id.0, LeaveStatus::Approved)
        .await
}

pub async fn reject_leave(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LEAVE_SERVICE
        .set_leave_status(&req, id.0, LeaveStatus::Rejected)
        .await
}

// 配置路由
pub fn configure_leave_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/leaves")
            .route("", web::get().to(list_leaves))
            .route("", web::post().to(create_leave))
            .route("/{id}", web::get().to(get_leave))
            .route("/{id}", web::put().to(replace_leave))
            .route("/{id}", web::patch().to(partial_update_leave))
            .route("/{id}", web::delete().to(delete_leave))
            .route("/{id}/approve", web::post().to(approve_leave))
            .route("/{id}/reject", web::post().to(reject_leave)),
    );
}
