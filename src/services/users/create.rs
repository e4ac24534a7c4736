use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, info};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::Storage;
use crate::utils::password::{hash_password, make_unusable_password};
use crate::utils::validate::{
    validate_email, validate_name, validate_password, validate_student_class_fields,
};

pub async fn create_user(
    service: &UserService,
    user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match insert_user(&storage, user_data, false).await {
        Ok(user) => Ok(HttpResponse::Created().json(ApiResponse::success(
            user,
            "User created successfully",
        ))),
        Err(response) => Ok(response),
    }
}

/// 校验并创建用户，注册与后台创建共用
///
/// `require_password` 为 false 时允许不带密码，此时账户密码不可用。
pub(crate) async fn insert_user(
    storage: &Arc<dyn Storage>,
    mut user_data: CreateUserRequest,
    require_password: bool,
) -> Result<User, HttpResponse> {
    user_data.name = user_data.name.trim().to_string();
    user_data.email = user_data.email.trim().to_string();

    // 验证姓名
    if let Err(msg) = validate_name(&user_data.name) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    // 验证邮箱
    if let Err(msg) = validate_email(&user_data.email) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    user_data.normalize_role_fields();
    if let Err(msg) = validate_student_class_fields(
        user_data.class_name.as_deref(),
        user_data.division.as_deref(),
    ) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    // 邮箱唯一
    match storage.get_user_by_email(&user_data.email).await {
        Ok(Some(_)) => {
            return Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "A user with this email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserCreationFailed,
                    format!("User creation failed: {e}"),
                )),
            );
        }
    }

    // 密码哈希，未提供密码时生成不可用的密码
    let password_hash = match user_data.password.take() {
        Some(password) => {
            if let Err(msg) = validate_password(&password) {
                return Err(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
            }
            match hash_password(&password) {
                Ok(hash) => hash,
                Err(e) => {
                    return Err(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Password hashing failed: {e}"),
                        )),
                    );
                }
            }
        }
        None if require_password => {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserPasswordInvalid,
                "Password is required",
            )));
        }
        None => make_unusable_password(),
    };
    user_data.password = Some(password_hash);

    match storage.create_user(user_data).await {
        Ok(user) => {
            info!("User {} created with role {}", user.email, user.role);
            Ok(user)
        }
        Err(e) if e.is_unique_violation() => Err(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "A user with this email already exists",
            ),
        )),
        Err(e) => {
            let msg = format!("User creation failed: {e}");
            error!("{}", msg);
            Err(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::UserCreationFailed, msg)))
        }
    }
}
