use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::CreateSubjectRequest};
use crate::storage::Storage;

/// 科目名称最大长度
pub(crate) const MAX_SUBJECT_NAME_LENGTH: usize = 100;

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    mut data: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    data.name = data.name.trim().to_string();
    if let Err(response) = check_subject_name(&data.name) {
        return Ok(response);
    }
    if let Some(teacher_id) = data.class_teacher_id
        && let Err(response) = check_subject_teacher(&storage, teacher_id).await
    {
        return Ok(response);
    }

    match storage.create_subject(data).await {
        Ok(subject) => Ok(HttpResponse::Created().json(ApiResponse::success(
            subject,
            "Subject created successfully",
        ))),
        Err(e) => {
            error!("Subject creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Subject creation failed: {e}"),
                )),
            )
        }
    }
}

pub(crate) fn check_subject_name(name: &str) -> Result<(), HttpResponse> {
    if name.is_empty() || name.chars().count() > MAX_SUBJECT_NAME_LENGTH {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubjectInvalid,
            "Subject name must be between 1 and 100 characters",
        )));
    }
    Ok(())
}

/// 任课教师必须是教师账号
pub(crate) async fn check_subject_teacher(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_id(teacher_id).await {
        Ok(Some(user)) if user.is_teacher() => Ok(()),
        Ok(_) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubjectInvalid,
            "class_teacher must reference an existing teacher",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to validate subject teacher: {e}"),
            )),
        ),
    }
}
