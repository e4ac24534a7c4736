/*!
 * 速率限制中间件
 *
 * 按客户端 IP 统计认证接口的请求次数，超过限制返回 429 并带上 `Retry-After`。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

/// 时间窗口（秒），计数在窗口结束后整体过期
const WINDOW_SECS: u64 = 60;

/// 键: 前缀:IP，值: 窗口内的请求数
static RATE_LIMIT_CACHE: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(WINDOW_SECS))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    key_prefix: &'static str,
}

impl RateLimit {
    pub fn new(max_requests: u32, key_prefix: &'static str) -> Self {
        Self {
            max_requests,
            key_prefix,
        }
    }

    /// 登录：5次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, "login")
    }

    /// 注册：3次/分钟/IP
    pub fn register() -> Self {
        Self::new(3, "register")
    }
}

/// 客户端 IP，优先使用连接地址，其次是反向代理头
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.clone();
    }

    // peer_addr 带端口时只取 IP 部分
    if let Some(addr) = req.peer_addr() {
        return addr.ip().to_string();
    }

    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next()
        && ip.trim().parse::<IpAddr>().is_ok()
    {
        return ip.trim().to_string();
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn too_many_requests() -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header(("Retry-After", WINDOW_SECS.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            max_requests: self.max_requests,
            key_prefix: self.key_prefix,
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    max_requests: u32,
    key_prefix: &'static str,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let max_requests = self.max_requests;
        let key_prefix = self.key_prefix;

        Box::pin(async move {
            let cache_key = format!("{}:{}", key_prefix, extract_client_ip(&req));

            let current_count = RATE_LIMIT_CACHE.get(&cache_key).await.unwrap_or(0);
            if current_count >= max_requests {
                warn!(
                    "Rate limit exceeded for {} ({}/{})",
                    cache_key, current_count, max_requests
                );
                return Ok(req.into_response(too_many_requests().map_into_right_body()));
            }

            RATE_LIMIT_CACHE
                .insert(cache_key, current_count + 1)
                .await;

            let remaining = max_requests.saturating_sub(current_count + 1);
            let mut res = srv.call(req).await?.map_into_left_body();
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(max_requests),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(remaining),
            );
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test::TestRequest, web};

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.key_prefix, "login");

        let register = RateLimit::register();
        assert_eq!(register.max_requests, 3);
        assert_eq!(register.key_prefix, "register");
    }

    #[actix_web::test]
    async fn test_blocks_after_limit() {
        let app = actix_web::test::init_service(
            App::new().service(
                web::resource("/limited")
                    .wrap(RateLimit::new(2, "test_blocks"))
                    .route(web::post().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        let peer = "10.20.30.40:5555".parse().unwrap();
        for _ in 0..2 {
            let req = TestRequest::post()
                .uri("/limited")
                .peer_addr(peer)
                .to_request();
            let resp = actix_web::test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = TestRequest::post()
            .uri("/limited")
            .peer_addr(peer)
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(resp.headers().get("Retry-After").unwrap(), "60");

        // 其他 IP 不受影响
        let req = TestRequest::post()
            .uri("/limited")
            .peer_addr("10.20.30.41:5555".parse().unwrap())
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
