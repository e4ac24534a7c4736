use crate::config::AppConfig;
use crate::errors::SchoolHubError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::Rng;

/// 不可用密码的前缀，任何输入都无法通过校验
const UNUSABLE_PASSWORD_PREFIX: char = '!';
const UNUSABLE_PASSWORD_SUFFIX_LENGTH: usize = 40;

/// 哈希密码
pub fn hash_password(password: &str) -> Result<String, SchoolHubError> {
    let config = AppConfig::get();
    let params = Params::new(
        config.argon2.memory_cost,
        config.argon2.time_cost,
        config.argon2.parallelism,
        None,
    )
    .map_err(|e| SchoolHubError::validation(format!("Argon2 参数错误: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SchoolHubError::validation(format!("密码哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 生成不可用的密码哈希（未设置密码的账户）
pub fn make_unusable_password() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    let suffix: String = (0..UNUSABLE_PASSWORD_SUFFIX_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect();
    format!("{UNUSABLE_PASSWORD_PREFIX}{suffix}")
}

/// 验证密码
pub fn verify_password(password: &str, hash: &str) -> bool {
    if hash.starts_with(UNUSABLE_PASSWORD_PREFIX) {
        return false;
    }
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret-pass").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("s3cret-pass", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_unusable_password_never_verifies() {
        let hash = make_unusable_password();
        assert!(hash.starts_with('!'));
        assert_eq!(hash.len(), 41);
        assert!(!verify_password("", &hash));
        assert!(!verify_password(&hash, &hash));
    }
}
