use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, info};

use super::ClassService;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::requests::{ClassWrite, CreateClassRequest},
};
use crate::storage::Storage;
use crate::utils::validate::{validate_class_number, validate_division};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let write = ClassWrite {
        class_number: class_data.class_number,
        division: class_data.division.trim().to_uppercase(),
        class_teacher_id: class_data.class_teacher_id,
        class_teacher_name: None,
        subject_teachers: class_data.subject_teachers,
        subjects: class_data.subjects,
    };

    let write = match check_class_write(&storage, write, None).await {
        Ok(write) => write,
        Err(response) => return Ok(response),
    };

    match storage.create_class(write).await {
        Ok(class) => {
            info!("Class {} created", class.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::ClassAlreadyExists,
                "A class with this number and division already exists",
            ),
        )),
        Err(e) => {
            let msg = format!("Class creation failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
        }
    }
}

/// 校验班级写入数据并填充班主任姓名
///
/// `current_id` 为更新时的班级 ID，用于排除自身。
pub(crate) async fn check_class_write(
    storage: &Arc<dyn Storage>,
    mut write: ClassWrite,
    current_id: Option<i64>,
) -> Result<ClassWrite, HttpResponse> {
    if let Err(msg) = validate_class_number(write.class_number) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ClassInvalid, msg)));
    }
    if let Err(msg) = validate_division(&write.division) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ClassInvalid, msg)));
    }

    // 班主任必须存在且为教师，且不能同时带其他班
    write.class_teacher_name = None;
    if let Some(teacher_id) = write.class_teacher_id {
        let teacher = match storage.get_user_by_id(teacher_id).await {
            Ok(Some(user)) if user.is_teacher() => user,
            Ok(_) => {
                return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ClassTeacherNotFound,
                    "Class teacher not found",
                )));
            }
            Err(e) => return Err(internal_error(e)),
        };

        match storage.get_class_by_teacher(teacher_id).await {
            Ok(Some(other)) if Some(other.id) != current_id => {
                return Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::ClassTeacherAlreadyAssigned,
                    format!("{} is already the class teacher of {}", teacher.name, other.name),
                )));
            }
            Ok(_) => {}
            Err(e) => return Err(internal_error(e)),
        }

        write.class_teacher_name = Some(teacher.name);
    }

    // 任课教师必须是教授该科目的教师
    for (subject, teacher_id) in &write.subject_teachers {
        match storage.get_user_by_id(*teacher_id).await {
            Ok(Some(user))
                if user.is_teacher()
                    && user
                        .subject
                        .as_deref()
                        .is_some_and(|s| s.eq_ignore_ascii_case(subject)) => {}
            Ok(_) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::SubjectTeacherInvalid,
                    format!("Teacher {teacher_id} is not a teacher of {subject}"),
                )));
            }
            Err(e) => return Err(internal_error(e)),
        }
    }

    Ok(write)
}

fn internal_error(e: crate::errors::SchoolHubError) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("Failed to validate class: {e}"),
    ))
}
