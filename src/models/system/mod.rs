use serde::Serialize;
use ts_rs::TS;

// 接口目录中的一项
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/system.ts")]
pub struct EndpointInfo {
    pub path: String,
    pub methods: String,
    pub description: String,
}

// 根路径欢迎信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/system.ts")]
pub struct WelcomeResponse {
    pub name: String,
    pub version: String,
    pub endpoints: Vec<EndpointInfo>,
}

// 健康检查
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/system.ts")]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub uptime_seconds: i64,
    pub started_at: chrono::DateTime<chrono::Utc>,
}
