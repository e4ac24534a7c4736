use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use super::create::{check_subject_name, check_subject_teacher};
use crate::models::{ApiResponse, ErrorCode, subjects::requests::UpdateSubjectRequest};

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    id: i64,
    mut data: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(name) = data.name.as_mut() {
        *name = name.trim().to_string();
        if let Err(response) = check_subject_name(name) {
            return Ok(response);
        }
    }
    if let Some(Some(teacher_id)) = data.class_teacher_id
        && let Err(response) = check_subject_teacher(&storage, teacher_id).await
    {
        return Ok(response);
    }

    match storage.update_subject(id, data).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update subject: {e}"),
            )),
        ),
    }
}
