//! 密码工具模块
//!
//! Basic 认证的密码可以明文配置，也可以配置为 Argon2id 哈希

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use subtle::ConstantTimeEq;

use crate::errors::{RelinkerError, Result};

/// 对密码进行 Argon2id 哈希
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| RelinkerError::password(e.to_string()))
}

/// 验证密码是否匹配哈希
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| RelinkerError::password(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// 检测字符串是否是 Argon2 哈希格式
pub fn is_argon2_hash(s: &str) -> bool {
    s.starts_with("$argon2")
}

/// 将用户提交的密码与配置值比较
///
/// 配置值为 Argon2 哈希时走哈希验证，否则常量时间比较明文。
/// 哈希本身无法解析时视为不匹配。
pub fn matches_configured(candidate: &str, configured: &str) -> bool {
    if is_argon2_hash(configured) {
        return verify_password(candidate, configured).unwrap_or(false);
    }
    candidate.as_bytes().ct_eq(configured.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter2").unwrap();
        assert!(is_argon2_hash(&hash));
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn test_matches_plaintext() {
        assert!(matches_configured("secret", "secret"));
        assert!(!matches_configured("secret", "Secret"));
        assert!(!matches_configured("", "secret"));
    }

    #[test]
    fn test_matches_hash() {
        let hash = hash_password("secret").unwrap();
        assert!(matches_configured("secret", &hash));
        assert!(!matches_configured(&hash, &hash));
    }

    #[test]
    fn test_broken_hash_never_matches() {
        assert!(!matches_configured("secret", "$argon2id$garbage"));
    }
}
