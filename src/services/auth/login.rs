use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{AuthUserResponse, LoginRequest},
};
use crate::utils::password::verify_password;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let email = login_request.email.trim();
    if email.is_empty() || login_request.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Email and password are required",
        )));
    }

    let storage = service.get_storage(request);

    // 1. 根据邮箱获取用户
    let user = match storage.get_user_by_email(email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        warn!("Failed login attempt for {}", user.email);
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Invalid credentials",
        )));
    }

    // 3. 校验角色
    if !user.role.matches_user_type(&login_request.user_type) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::InvalidUserType,
            "Invalid user type",
        )));
    }

    if !user.is_active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccountDisabled,
            "Account is disabled",
        )));
    }

    // 4. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for {}: {}", user.email, e);
    }
    let user = match storage.get_user_by_id(user.id).await {
        Ok(Some(refreshed)) => refreshed,
        _ => user,
    };

    info!("User {} logged in successfully", user.email);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AuthUserResponse { user },
        "Login successful",
    )))
}
