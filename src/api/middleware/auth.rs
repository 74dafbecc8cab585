use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{debug, info, trace};

use crate::api::constants;
use crate::config::AuthConfig;
use crate::utils::password::matches_configured;

/// HTTP Basic authentication for `/list` and `/create`.
#[derive(Clone)]
pub struct BasicAuth {
    credentials: Arc<AuthConfig>,
}

impl BasicAuth {
    pub fn new(credentials: AuthConfig) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BasicAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BasicAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BasicAuthMiddleware {
            service: Rc::new(service),
            credentials: Arc::clone(&self.credentials),
        }))
    }
}

pub struct BasicAuthMiddleware<S> {
    service: Rc<S>,
    credentials: Arc<AuthConfig>,
}

impl<S, B> BasicAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// Handle requests when credentials are not configured
    fn handle_missing_credentials(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        debug!("Basic auth credentials not configured - returning 404");
        req.into_response(
            HttpResponse::NotFound()
                .insert_header((CONTENT_TYPE, constants::TEXT_PLAIN))
                .body("404 Not Found")
                .map_into_right_body(),
        )
    }

    /// Handle unauthorized requests
    fn handle_unauthorized(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!(path = req.path(), "Basic authentication failed");
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((CONTENT_TYPE, constants::TEXT_PLAIN))
                .insert_header((
                    WWW_AUTHENTICATE,
                    format!("Basic realm=\"{}\", charset=\"UTF-8\"", constants::AUTH_REALM),
                ))
                .body("401 Unauthorized")
                .map_into_right_body(),
        )
    }

    /// 从 Authorization header 提取 Basic 凭据
    fn extract_basic_credentials(req: &ServiceRequest) -> Option<(String, String)> {
        let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
        let (scheme, encoded) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("Basic") {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some((username.to_string(), password.to_string()))
    }

    fn validate(credentials: &AuthConfig, username: &str, password: &str) -> bool {
        let username_ok: bool = username
            .as_bytes()
            .ct_eq(credentials.username.as_bytes())
            .into();
        // 用户名不匹配也要跑一遍密码校验，避免时序差异
        let password_ok = matches_configured(password, &credentials.password);
        username_ok && password_ok
    }
}

impl<S, B> Service<ServiceRequest> for BasicAuthMiddleware<S>
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
        let credentials = Arc::clone(&self.credentials);

        Box::pin(async move {
            if !credentials.is_configured() {
                return Ok(Self::handle_missing_credentials(req));
            }

            match Self::extract_basic_credentials(&req) {
                Some((username, password))
                    if Self::validate(&credentials, &username, &password) =>
                {
                    trace!("Basic authentication successful");
                    let response = srv.call(req).await?.map_into_left_body();
                    Ok(response)
                }
                _ => Ok(Self::handle_unauthorized(req)),
            }
        })
    }
}
