use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::classes::requests::{
    ClassListParams, CreateClassRequest, SubjectDashboardQuery, TeacherQuery, UpdateClassRequest,
};
use crate::services::ClassService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassListParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, query.into_inner()).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn get_class(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, class_id.0).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeIDI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, class_id.0, update_data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, class_id.0).await
}

pub async fn get_class_by_teacher(
    req: HttpRequest,
    query: web::Query<TeacherQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .get_class_by_teacher(&req, query.into_inner())
        .await
}

pub async fn list_class_students(
    req: HttpRequest,
    class_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_class_students(&req, class_id.0).await
}

pub async fn teacher_dashboard(
    req: HttpRequest,
    query: web::Query<TeacherQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .teacher_dashboard(&req, query.into_inner())
        .await
}

pub async fn subject_teacher_dashboard(
    req: HttpRequest,
    query: web::Query<SubjectDashboardQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .subject_teacher_dashboard(&req, query.into_inner())
        .await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/classes")
            .route("", web::get().to(list_classes))
            .route("", web::post().to(create_class))
            // 固定路径需在 /{id} 之前注册
            .route("/by_class_teacher", web::get().to(get_class_by_teacher))
            .route("/teacher_dashboard", web::get().to(teacher_dashboard))
            .route(
                "/subject_teacher_dashboard",
                web::get().to(subject_teacher_dashboard),
            )
            .route("/{id}", web::get().to(get_class))
            .route("/{id}", web::put().to(update_class))
            .route("/{id}", web::patch().to(update_class))
            .route("/{id}", web::delete().to(delete_class))
            .route("/{id}/students", web::get().to(list_class_students)),
    )
    // 科目教师看板的别名
    .route(
        "/api/teachers/subject_dashboard",
        web::get().to(subject_teacher_dashboard),
    );
}
