//! # Security Headers Middleware
//!
//! Adds the HTTP security headers configured in [`SecurityHeadersConfig`] to
//! every response: `Content-Security-Policy`, `X-Frame-Options`,
//! `X-Content-Type-Options`, `Referrer-Policy`, and `Strict-Transport-Security`
//! when `hsts_max_age` is non-zero.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lighter_web::config::SecurityHeadersConfig;
//! use lighter_web::security::SecurityHeadersMiddleware;
//! use actix_web::{App, HttpServer};
//!
//! #[actix_web::main]
//! async fn main() {
//!     let config = SecurityHeadersConfig::default();
//!
//!     HttpServer::new(move || {
//!         App::new()
//!             .wrap(SecurityHeadersMiddleware::new(config.clone()))
//!     })
//!     .bind("0.0.0.0:8080")
//!     .unwrap()
//!     .run()
//!     .await
//!     .unwrap()
//! }
//! ```

use std::future::{Ready, ready};

use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;

use crate::config::SecurityHeadersConfig;

/// Security headers middleware for actix-web
pub struct SecurityHeadersMiddleware {
    config: SecurityHeadersConfig,
}

impl SecurityHeadersMiddleware {
    pub fn new(config: SecurityHeadersConfig) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeadersMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityHeadersMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddlewareService {
            service,
            config: self.config.clone(),
        }))
    }
}

pub struct SecurityHeadersMiddlewareService<S> {
    service: S,
    config: SecurityHeadersConfig,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let config = self.config.clone();

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            if !config.enabled {
                return Ok(res);
            }

            let headers = res.headers_mut();

            insert(headers, "content-security-policy", &config.csp);
            insert(headers, "x-frame-options", &config.x_frame_options);
            insert(headers, "x-content-type-options", &config.x_content_type_options);
            insert(headers, "referrer-policy", &config.referrer_policy);

            if config.hsts_max_age > 0 {
                let hsts = format!("max-age={}; includeSubDomains", config.hsts_max_age);
                insert(headers, "strict-transport-security", &hsts);
            }

            Ok(res)
        })
    }
}

/// Skips empty values and values that are not valid header text.
fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) {
    if value.is_empty() {
        return;
    }

    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(HeaderName::from_static(name), value);
        }
        Err(e) => {
            ::tracing::warn!(header = name, error = %e, "Skipping invalid security header value");
        }
    }
}
