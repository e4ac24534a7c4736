use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, info};

use super::LeaveService;
use crate::models::{
    ApiResponse, ErrorCode,
    leaves::{
        entities::LeaveStatus,
        requests::{CreateLeaveRequest, LeaveWrite},
    },
};
use crate::storage::Storage;

/// 请假原因最大长度
const MAX_REASON_LENGTH: usize = 255;

pub async fn create_leave(
    service: &LeaveService,
    request: &HttpRequest,
    data: CreateLeaveRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let write = match check_leave_write(&storage, data).await {
        Ok(write) => write,
        Err(response) => return Ok(response),
    };

    match storage.create_leave(write).await {
        Ok(leave) => {
            info!("Leave {} created for student {}", leave.id, leave.student_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(leave, "Leave created successfully")))
        }
        Err(e) => {
            error!("Leave creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Leave creation failed: {e}"),
                )),
            )
        }
    }
}

/// 校验请假数据：学生必须存在且为学生，结束日期不早于开始日期
pub(crate) async fn check_leave_write(
    storage: &Arc<dyn Storage>,
    data: CreateLeaveRequest,
) -> Result<LeaveWrite, HttpResponse> {
    let invalid =
        |msg: &str| HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::LeaveInvalid, msg));

    let Some(student_id) = data.student_id else {
        return Err(invalid("student is required"));
    };

    match storage.get_user_by_id(student_id).await {
        Ok(Some(user)) if user.is_student() => {}
        Ok(_) => return Err(invalid("student must reference an existing student")),
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to validate leave: {e}"),
                )),
            );
        }
    }

    let reason = data.reason.trim().to_string();
    if reason.is_empty() || reason.chars().count() > MAX_REASON_LENGTH {
        return Err(invalid("reason must be between 1 and 255 characters"));
    }

    if data.end_date < data.start_date {
        return Err(invalid("end_date cannot be before start_date"));
    }

    Ok(LeaveWrite {
        student_id,
        reason,
        start_date: data.start_date,
        end_date: data.end_date,
        details: data.details,
        status: data.status.unwrap_or(LeaveStatus::Pending),
    })
}
