//! Write confirmation gate
//!
//! Double-submit cookie: a create request proceeds only when the `token`
//! query parameter equals the `token` cookie. Otherwise a fresh random token
//! is issued; the gateway sets it as a same-site cookie and links back to the
//! same request URI with the token appended. A cross-origin page can trigger
//! the first request but cannot read the cookie, so it can never produce the
//! matching second request.
//!
//! The gate keeps no server-side state. A token stays valid until a later
//! challenge replaces the cookie.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use subtle::ConstantTimeEq;
use tracing::{debug, trace};

/// Number of random bytes behind each token.
pub const TOKEN_BYTES: usize = 32;

/// Source of confirmation tokens.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// `rand`'s thread-local CSPRNG, URL-safe base64 without padding.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        let bytes: [u8; TOKEN_BYTES] = rand::random();
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Query and cookie tokens match; the write may proceed once.
    Confirmed,
    /// Missing or mismatched tokens; carries the freshly issued token.
    Challenged(String),
}

#[derive(Clone)]
pub struct ConfirmationGate {
    tokens: Arc<dyn TokenGenerator>,
}

impl ConfirmationGate {
    pub fn new(tokens: Arc<dyn TokenGenerator>) -> Self {
        Self { tokens }
    }

    pub fn check(&self, query_token: Option<&str>, cookie_token: Option<&str>) -> GateDecision {
        // 空令牌一律视为缺失，两边都为空也不算确认
        let query_token = query_token.filter(|t| !t.is_empty());
        let cookie_token = cookie_token.filter(|t| !t.is_empty());

        match (query_token, cookie_token) {
            (Some(query), Some(cookie)) if tokens_match(query, cookie) => {
                trace!("Confirmation token accepted");
                GateDecision::Confirmed
            }
            (Some(_), Some(_)) => {
                debug!("Confirmation token mismatch, issuing a new challenge");
                GateDecision::Challenged(self.tokens.generate())
            }
            (None, _) => {
                debug!("Confirmation token missing from query, issuing a challenge");
                GateDecision::Challenged(self.tokens.generate())
            }
            (_, None) => {
                debug!("Confirmation cookie missing, issuing a challenge");
                GateDecision::Challenged(self.tokens.generate())
            }
        }
    }
}

impl std::fmt::Debug for ConfirmationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmationGate").finish_non_exhaustive()
    }
}

/// 常量时间比较两个字符串
fn tokens_match(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Builds the link that repeats the request with `token` attached.
///
/// Every existing `token` parameter is dropped so the new one is the only
/// value; all other parameters keep their order.
pub fn confirmation_link(path: &str, query: &str, token: &str) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if key != "token" {
            serializer.append_pair(&key, &value);
        }
    }
    serializer.append_pair("token", token);
    format!("{}?{}", path, serializer.finish())
}
