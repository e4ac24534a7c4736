use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SystemService;
use crate::models::{
    ApiResponse,
    system::{EndpointInfo, WelcomeResponse},
};

const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("/api/auth/login", "POST", "Log in with email, password and userType"),
    ("/api/auth/register", "POST", "Create an account"),
    ("/api/admin/stats", "GET", "Admin dashboard statistics"),
    ("/api/users", "GET, POST, PUT, PATCH, DELETE", "User accounts"),
    ("/api/classes", "GET, POST, PUT, DELETE", "Classes and teacher dashboards"),
    ("/api/attendance", "GET, POST, PUT, DELETE", "Attendance records and bulk marking"),
    ("/api/leaves", "GET, POST, PUT, PATCH, DELETE", "Leave requests"),
    ("/api/subjects", "GET, POST, PUT, DELETE", "Subjects"),
    ("/api/events", "GET, POST, PUT, DELETE", "School events"),
    ("/api/marks", "GET, POST, PUT, DELETE", "Exam marks"),
    ("/api/assignments", "GET, POST, PUT, DELETE", "Assignments"),
    ("/api/health", "GET", "Service health"),
];

pub async fn welcome(service: &SystemService, _request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let response = WelcomeResponse {
        name: format!("{} API", config.app.system_name),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ENDPOINTS
            .iter()
            .map(|(path, methods, description)| EndpointInfo {
                path: path.to_string(),
                methods: methods.to_string(),
                description: description.to_string(),
            })
            .collect(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Welcome")))
}
