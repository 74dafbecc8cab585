//! URL 验证模块
//!
//! 只有通过验证的 URL 才能成为重定向目标

use url::Url;

/// URL 验证错误
#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    Missing,
    DangerousScheme(String),
    UnsupportedScheme(String),
    MissingHost,
    Malformed(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "url parameter is missing or empty"),
            Self::DangerousScheme(scheme) => write!(f, "scheme '{}' is not allowed", scheme),
            Self::UnsupportedScheme(scheme) => write!(
                f,
                "unsupported scheme '{}': only http, https and ftp are allowed",
                scheme
            ),
            Self::MissingHost => write!(f, "url has no host"),
            Self::Malformed(msg) => write!(f, "invalid url: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 允许作为重定向目标的协议
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// 危险协议列表
const DANGEROUS_SCHEMES: &[&str] = &["javascript", "data", "file", "vbscript", "about", "blob"];

/// 验证重定向目标
///
/// 检查项目：
/// 1. 不为空
/// 2. 能被解析为绝对 URL
/// 3. 不是危险协议，且必须是 http / https / ftp
/// 4. 必须包含主机名
pub fn validate_url(raw: Option<&str>) -> Result<&str, UrlValidationError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let Some(url) = raw else {
        return Err(UrlValidationError::Missing);
    };

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::Malformed(e.to_string()))?;

    let scheme = parsed.scheme();
    if DANGEROUS_SCHEMES.contains(&scheme) {
        return Err(UrlValidationError::DangerousScheme(scheme.to_string()));
    }
    if !ALLOWED_SCHEMES.contains(&scheme) {
        return Err(UrlValidationError::UnsupportedScheme(scheme.to_string()));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}
