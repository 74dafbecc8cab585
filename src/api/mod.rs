//! HTTP gateway
//!
//! Route table, in registration order:
//!
//! - `GET /history/{code}`: public history
//! - `GET /list`: current mappings (Basic auth)
//! - `GET /create/{code}`: create or reassign (Basic auth, confirmation)
//! - `GET /{code}`: redirect

pub mod constants;
pub mod middleware;
pub mod query;
pub mod services;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::web;

use crate::config::{AuthConfig, ConfirmConfig};
use middleware::BasicAuth;
use services::{RedirectService, create_routes, history_routes, list_routes, redirect_routes};

/// Per-app settings the handlers read through `web::Data`.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl GatewaySettings {
    pub fn from_config(config: &ConfirmConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            cookie_secure: config.cookie_secure,
        }
    }

    /// Session cookie holding a confirmation token.
    pub fn build_confirm_cookie(&self, token: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.cookie_name.clone(), token);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.cookie_secure);
        cookie.set_same_site(SameSite::Strict);
        cookie
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self::from_config(&ConfirmConfig::default())
    }
}

/// Registers every gateway route; `/list` and `/create` are wrapped in
/// Basic authentication with `credentials`.
pub fn configure(cfg: &mut web::ServiceConfig, credentials: &AuthConfig) {
    let auth = BasicAuth::new(credentials.clone());
    cfg.service(history_routes())
        .service(list_routes().wrap(auth.clone()))
        .service(create_routes().wrap(auth))
        .service(redirect_routes())
        .default_service(web::to(RedirectService::handle_unmatched));
}
