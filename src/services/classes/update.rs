use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassService;
use super::create::check_class_write;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::requests::{ClassWrite, UpdateClassRequest},
};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_class_by_id(class_id).await {
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

    // 合并原有字段后整体校验
    let write = ClassWrite {
        class_number: update_data.class_number.unwrap_or(existing.class_number),
        division: update_data
            .division
            .map(|d| d.trim().to_uppercase())
            .unwrap_or(existing.division),
        class_teacher_id: update_data
            .class_teacher_id
            .unwrap_or(existing.class_teacher_id),
        class_teacher_name: existing.class_teacher_name,
        subject_teachers: update_data
            .subject_teachers
            .unwrap_or(existing.subject_teachers),
        subjects: update_data.subjects.unwrap_or(existing.subjects),
    };

    let write = match check_class_write(&storage, write, Some(class_id)).await {
        Ok(write) => write,
        Err(response) => return Ok(response),
    };

    match storage.update_class(class_id, write).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        ))),
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::ClassAlreadyExists,
                "A class with this number and division already exists",
            ),
        )),
        Err(e) => {
            error!("Failed to update class {}: {}", class_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update class information: {e}"),
                )),
            )
        }
    }
}
