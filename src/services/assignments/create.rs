use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, info};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode, assignments::requests::CreateAssignmentRequest};
use crate::storage::Storage;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    mut data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    data.title = data.title.trim().to_string();
    if data.title.is_empty() || data.class_name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentInvalid,
            "title and class_name are required",
        )));
    }

    let storage = service.get_storage(request);

    if let Err(response) = check_references(&storage, Some(data.teacher_id), data.subject_id).await
    {
        return Ok(response);
    }

    match storage.create_assignment(data).await {
        Ok(assignment) => {
            info!("Assignment {} created", assignment.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully",
            )))
        }
        Err(e) => {
            error!("Assignment creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Assignment creation failed: {e}"),
                )),
            )
        }
    }
}

/// 布置人必须是教师，科目必须存在
pub(crate) async fn check_references(
    storage: &Arc<dyn Storage>,
    teacher_id: Option<i64>,
    subject_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let internal = |e: crate::errors::SchoolHubError| {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("Failed to validate assignment: {e}"),
        ))
    };

    if let Some(teacher_id) = teacher_id {
        match storage.get_user_by_id(teacher_id).await {
            Ok(Some(user)) if user.is_teacher() => {}
            Ok(_) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::AssignmentInvalid,
                    "teacher must reference an existing teacher",
                )));
            }
            Err(e) => return Err(internal(e)),
        }
    }

    if let Some(subject_id) = subject_id {
        match storage.get_subject_by_id(subject_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::AssignmentInvalid,
                    "subject must reference an existing subject",
                )));
            }
            Err(e) => return Err(internal(e)),
        }
    }

    Ok(())
}
