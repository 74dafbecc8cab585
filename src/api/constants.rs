//! API 模块常量定义

/// Basic 认证的 realm
pub const AUTH_REALM: &str = "relinker";

/// 确认链接中携带令牌的查询参数名
pub const TOKEN_QUERY_PARAM: &str = "token";

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

pub const TEXT_HTML: &str = "text/html; charset=utf-8";
