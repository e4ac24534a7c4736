use serde::Deserialize;
use ts_rs::TS;

// 登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    // 期望的角色，与账号角色不一致时拒绝登录
    #[serde(rename = "userType", alias = "user_type")]
    pub user_type: String,
}
