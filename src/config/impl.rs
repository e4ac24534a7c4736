use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 默认配置文件
            .add_source(File::with_name("config").required(false))
            // 环境特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 环境变量覆盖，如 SCHOOLHUB__SERVER__PORT=9000
            .add_source(
                Environment::with_prefix("SCHOOLHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.normalize();

        Ok(app_config)
    }

    /// 处理派生字段
    fn normalize(&mut self) {
        if self.server.max_workers == 0 {
            self.server.max_workers = 1;
        }
        if self.server.workers == 0 {
            self.server.workers = num_cpus::get().min(self.server.max_workers);
        }
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let mut config = AppConfig::default();
        config.normalize();

        assert_eq!(config.app.system_name, "SchoolHub");
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.server_bind_address(), "127.0.0.1:8000");
        assert!(config.server.workers >= 1);
        assert!(config.server.workers <= config.server.max_workers);
        assert_eq!(config.argon2.time_cost, 2);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: AppConfig = Config::builder()
            .set_override("server.port", 9100i64)
            .and_then(|b| b.set_override("database.url", "sqlite::memory:"))
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.pool_size, 10);
        assert_eq!(config.seed.admin_email, "admin@school.local");
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_socket_path() {
        let mut config = AppConfig::default();
        assert!(config.unix_socket_path().is_none());
        config.server.unix_socket_path = "/tmp/schoolhub.sock".to_string();
        assert_eq!(config.unix_socket_path(), Some("/tmp/schoolhub.sock"));
    }
}
