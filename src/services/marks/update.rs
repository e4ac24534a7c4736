use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::models::{
    ApiResponse, ErrorCode,
    marks::{entities::validate_scores, requests::UpdateMarkRequest},
};

pub async fn update_mark(
    service: &MarkService,
    request: &HttpRequest,
    id: i64,
    data: UpdateMarkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_mark_by_id(id).await {
        Ok(Some(mark)) => mark,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MarkNotFound,
                "Mark not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get mark: {e}"),
                )),
            );
        }
    };

    let marks_obtained = data.marks_obtained.unwrap_or(existing.marks_obtained);
    let total_marks = data.total_marks.unwrap_or(existing.total_marks);
    if let Err(msg) = validate_scores(marks_obtained, total_marks) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::MarkInvalid, msg)));
    }

    match storage.update_mark(id, data).await {
        Ok(Some(mark)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            mark,
            "Mark updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MarkNotFound,
            "Mark not found",
        ))),
        // 改科目或考试类型后与已有成绩重复
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::Conflict,
                "A mark for this student, subject and exam type already exists",
            ),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update mark: {e}"),
            )),
        ),
    }
}
