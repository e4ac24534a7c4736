use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, auth::AuthUserResponse, users::requests::CreateUserRequest};
use crate::services::users::create::insert_user;

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 注册必须设置密码
    match insert_user(&storage, create_request, true).await {
        Ok(user) => Ok(HttpResponse::Created().json(ApiResponse::success(
            AuthUserResponse { user },
            "User created successfully",
        ))),
        Err(response) => Ok(response),
    }
}
