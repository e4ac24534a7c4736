use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::MarkService;
use crate::models::{
    ApiResponse, ErrorCode,
    marks::{entities::validate_scores, requests::CreateMarkRequest},
};

pub async fn create_mark(
    service: &MarkService,
    request: &HttpRequest,
    mut data: CreateMarkRequest,
) -> ActixResult<HttpResponse> {
    data.subject = data.subject.trim().to_string();
    data.exam_type = data.exam_type.trim().to_string();
    if data.subject.is_empty() || data.exam_type.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::MarkInvalid,
            "subject and exam_type are required",
        )));
    }
    if let Err(msg) = validate_scores(data.marks_obtained, data.total_marks) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::MarkInvalid, msg)));
    }

    let storage = service.get_storage(request);

    match storage.get_user_by_id(data.student_id).await {
        Ok(Some(user)) if user.is_student() => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to save mark: {e}"),
                )),
            );
        }
    }

    match storage.upsert_mark(data).await {
        Ok(result) if result.created => {
            info!("Mark {} created", result.mark.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                result.mark,
                "Mark created successfully",
            )))
        }
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result.mark,
            "Mark updated successfully",
        ))),
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::Conflict,
                "A mark for this student, subject and exam type is being saved concurrently",
            ),
        )),
        Err(e) => {
            error!("Failed to save mark: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to save mark: {e}"),
                )),
            )
        }
    }
}
