use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LeaveService;
use super::create::check_leave_write;
use crate::models::{
    ApiResponse, ErrorCode,
    leaves::{
        entities::Leave,
        requests::{CreateLeaveRequest, LeaveWrite, UpdateLeaveRequest},
    },
};

pub async fn replace_leave(
    service: &LeaveService,
    request: &HttpRequest,
    id: i64,
    mut data: CreateLeaveRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match load_existing(service, request, id).await {
        Ok(leave) => leave,
        Err(response) => return Ok(response),
    };

    // 未提供状态时保留原状态
    if data.status.is_none() {
        data.status = Some(existing.status);
    }

    let write = match check_leave_write(&storage, data).await {
        Ok(write) => write,
        Err(response) => return Ok(response),
    };

    save(service, request, id, write).await
}

pub async fn partial_update_leave(
    service: &LeaveService,
    request: &HttpRequest,
    id: i64,
    data: UpdateLeaveRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match load_existing(service, request, id).await {
        Ok(leave) => leave,
        Err(response) => return Ok(response),
    };

    let merged = CreateLeaveRequest {
        student_id: data.student_id.or(Some(existing.student_id)),
        reason: data.reason.unwrap_or(existing.reason),
        start_date: data.start_date.unwrap_or(existing.start_date),
        end_date: data.end_date.unwrap_or(existing.end_date),
        details: data.details.or(existing.details),
        status: data.status.or(Some(existing.status)),
    };

    let write = match check_leave_write(&storage, merged).await {
        Ok(write) => write,
        Err(response) => return Ok(response),
    };

    save(service, request, id, write).await
}

async fn load_existing(
    service: &LeaveService,
    request: &HttpRequest,
    id: i64,
) -> Result<Leave, HttpResponse> {
    match service.get_storage(request).get_leave_by_id(id).await {
        Ok(Some(leave)) => Ok(leave),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LeaveNotFound,
            "Leave not found",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get leave: {e}"),
            )),
        ),
    }
}

async fn save(
    service: &LeaveService,
    request: &HttpRequest,
    id: i64,
    write: LeaveWrite,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).update_leave(id, write).await {
        Ok(Some(leave)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            leave,
            "Leave updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LeaveNotFound,
            "Leave not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update leave: {e}"),
            )),
        ),
    }
}
