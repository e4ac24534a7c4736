use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::attendance::requests::{
    AttendanceListParams, BulkMarkRequest, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::services::AttendanceService;
use crate::utils::{SafeIDI64, SafeStudentIdI64};

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(&req, query.into_inner())
        .await
}

pub async fn create_attendance(
    req: HttpRequest,
    data: web::Json<CreateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .create_attendance(&req, data.into_inner())
        .await
}

pub async fn get_attendance(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_attendance(&req, id.0).await
}

pub async fn update_attendance(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(&req, id.0, data.into_inner())
        .await
}

pub async fn delete_attendance(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.delete_attendance(&req, id.0).await
}

pub async fn bulk_mark(
    req: HttpRequest,
    data: web::Json<BulkMarkRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.bulk_mark(&req, data.into_inner()).await
}

pub async fn student_summary(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.student_summary(&req, student_id.0).await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/attendance")
            .route("", web::get().to(list_attendance))
            .route("", web::post().to(create_attendance))
            .route("/bulk_mark", web::post().to(bulk_mark))
            .route("/summary/{student_id}", web::get().to(student_summary))
            .route("/{id}", web::get().to(get_attendance))
            .route("/{id}", web::put().to(update_attendance))
            .route("/{id}", web::patch().to(update_attendance))
            .route("/{id}", web::delete().to(delete_attendance)),
    );
}
