use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号
///
/// 数据库中没有管理员时创建一个，密码取 `ADMIN_PASSWORD`，未设置则随机生成并打印一次。
/// 返回是否创建了新账号。
pub async fn seed_admin(storage: &Arc<dyn Storage>) -> Result<bool> {
    let admins = storage.count_users_by_role(UserRole::Admin).await?;
    if admins > 0 {
        debug!("Database already has {} admin(s), skipping admin seed", admins);
        return Ok(false);
    }

    info!("No admin found in database, creating default admin account...");

    let password = std::env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| {
            let pwd = generate_random_password(16);
            warn!("==========================================================");
            warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
            warn!("  Generated admin password: {}", pwd);
            warn!("  Please save this password or set ADMIN_PASSWORD env var");
            warn!("==========================================================");
            pwd
        });

    let seed = &AppConfig::get().seed;
    let admin_request = CreateUserRequest {
        name: seed.admin_name.clone(),
        email: seed.admin_email.clone(),
        password: Some(hash_password(&password)?),
        role: UserRole::Admin,
        class_name: None,
        division: None,
        subject: None,
        phone: None,
        is_active: Some(true),
    };

    let user = storage.create_user(admin_request).await?;
    info!(
        "Default admin account created successfully (ID: {}, email: {})",
        user.id, user.email
    );
    Ok(true)
}

/// 准备服务器启动的上下文：连接数据库、执行迁移、初始化管理员
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    if let Err(e) = seed_admin(&storage).await {
        warn!("Failed to seed admin account: {}", e);
    }

    Ok(StartupContext { storage })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[test]
    fn test_generated_password_length() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
        assert_ne!(pwd, generate_random_password(16));
    }

    #[actix_web::test]
    async fn test_seed_admin_only_once() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());

        assert!(seed_admin(&storage).await.unwrap());
        assert!(!seed_admin(&storage).await.unwrap());
        assert_eq!(storage.count_users_by_role(UserRole::Admin).await.unwrap(), 1);
    }
}
