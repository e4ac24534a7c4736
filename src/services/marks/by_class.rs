use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::models::{
    ApiResponse, ErrorCode,
    marks::{requests::MarksByClassQuery, responses::MarksByClassResponse},
};

pub async fn marks_by_class(
    service: &MarkService,
    request: &HttpRequest,
    query: MarksByClassQuery,
) -> ActixResult<HttpResponse> {
    let Some(class_id) = query.class_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "class_id is required",
        )));
    };

    let storage = service.get_storage(request);

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get class information: {e}"),
                )),
            );
        }
    };

    match storage
        .list_marks_by_class(&class.class_number.to_string(), &class.division)
        .await
    {
        Ok(marks) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarksByClassResponse {
                total_records: marks.len() as i64,
                marks,
            },
            "Class marks retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve class marks: {e}"),
            )),
        ),
    }
}
