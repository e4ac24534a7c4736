use serde::Serialize;
use ts_rs::TS;

use crate::models::users::entities::User;

// 登录/注册成功后返回的用户信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/auth.ts")]
pub struct AuthUserResponse {
    pub user: User,
}
