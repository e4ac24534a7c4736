use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::marks::requests::{
    CreateMarkRequest, MarkListParams, MarksByClassQuery, UpdateMarkRequest,
};
use crate::services::MarkService;
use crate::utils::SafeIDI64;

static MARK_SERVICE: Lazy<MarkService> = Lazy::new(MarkService::new_lazy);

pub async fn list_marks(
    req: HttpRequest,
    query: web::Query<MarkListParams>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.list_marks(&req, query.into_inner()).await
}

pub async fn create_mark(
    req: HttpRequest,
    data: web::Json<CreateMarkRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.create_mark(&req, data.into_inner()).await
}

pub async fn get_mark(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.get_mark(&req, id.0).await
}

pub async fn update_mark(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateMarkRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.update_mark(&req, id.0, data.into_inner()).await
}

pub async fn delete_mark(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.delete_mark(&req, id.0).await
}

pub async fn marks_by_class(
    req: HttpRequest,
    query: web::Query<MarksByClassQuery>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.marks_by_class(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_mark_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/marks")
            .route("", web::get().to(list_marks))
            .route("", web::post().to(create_mark))
            .route("/by_class", web::get().to(marks_by_class))
            .route("/{id}", web::get().to(get_mark))
            .route("/{id}", web::put().to(update_mark))
            .route("/{id}", web::patch().to(update_mark))
            .route("/{id}", web::delete().to(delete_mark)),
    );
}
