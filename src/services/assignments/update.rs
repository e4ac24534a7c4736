use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use super::create::check_references;
use crate::models::{ApiResponse, ErrorCode, assignments::requests::UpdateAssignmentRequest};

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: i64,
    data: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    if data.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentInvalid,
            "title cannot be empty",
        )));
    }

    let storage = service.get_storage(request);

    if let Err(response) = check_references(&storage, data.teacher_id, data.subject_id).await {
        return Ok(response);
    }

    match storage.update_assignment(id, data).await {
        Ok(Some(assignment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update assignment: {e}"),
            )),
        ),
    }
}
