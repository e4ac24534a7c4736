use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode, classes::requests::TeacherQuery};

pub async fn get_class_by_teacher(
    service: &ClassService,
    request: &HttpRequest,
    query: TeacherQuery,
) -> ActixResult<HttpResponse> {
    let Some(teacher_id) = query.teacher_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "teacher_id is required",
        )));
    };

    let storage = service.get_storage(request);

    match storage.get_class_by_teacher(teacher_id).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "No class assigned to this teacher",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get class information: {e}"),
            )),
        ),
    }
}
