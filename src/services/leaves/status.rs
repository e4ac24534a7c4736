use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::LeaveService;
use crate::models::{ApiResponse, ErrorCode, leaves::entities::LeaveStatus};

pub async fn set_leave_status(
    service: &LeaveService,
    request: &HttpRequest,
    id: i64,
    status: LeaveStatus,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_leave_status(id, status).await {
        Ok(Some(leave)) => {
            info!("Leave {} set to {}", id, status);
            let message = match status {
                LeaveStatus::Approved => "Leave approved successfully",
                LeaveStatus::Rejected => "Leave rejected successfully",
                LeaveStatus::Pending => "Leave status updated successfully",
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(leave, message)))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LeaveNotFound,
            "Leave not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update leave status: {e}"),
            )),
        ),
    }
}
