//! 路径参数提取器
//!
//! 路径中的 ID 无法解析为正整数时直接返回 400，不进入业务处理。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_path_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid {name}: {raw}"),
            ));
            Err(InternalError::from_response(format!("invalid path parameter {name}"), response)
                .into())
        }
    }
}

/// 路径中的 `{id}`
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_path_id(req, "id").map(SafeIDI64))
    }
}

/// 路径中的 `{student_id}`
#[derive(Debug, Clone, Copy)]
pub struct SafeStudentIdI64(pub i64);

impl FromRequest for SafeStudentIdI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_path_id(req, "student_id").map(SafeStudentIdI64))
    }
}
