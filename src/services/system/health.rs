use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::error;

use super::SystemService;
use crate::models::{AppStartTime, ApiResponse, ErrorCode, system::HealthResponse};

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 未注入启动时间时以当前时间计
    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|t| t.start_datetime)
        .unwrap_or_else(chrono::Utc::now);
    let uptime_seconds = chrono::Utc::now()
        .signed_duration_since(started_at)
        .num_seconds();

    match storage.ping().await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            HealthResponse {
                status: "ok".to_string(),
                database: "ok".to_string(),
                uptime_seconds,
                started_at,
            },
            "Service is healthy",
        ))),
        Err(e) => {
            error!("Health check failed: {}", e);
            Ok(
                HttpResponse::ServiceUnavailable().json(ApiResponse::error(
                    ErrorCode::InternalServerError,
                    HealthResponse {
                        status: "degraded".to_string(),
                        database: "unreachable".to_string(),
                        uptime_seconds,
                        started_at,
                    },
                    format!("Database unreachable: {e}"),
                )),
            )
        }
    }
}
