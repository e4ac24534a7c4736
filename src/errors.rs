//! 统一错误处理模块
//!
//! 使用宏生成 `SchoolHubError`，每个变体携带错误详情，并提供错误代码与类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 生成 enum、`code()`、`error_type()`、`message()` 以及 snake_case 构造函数。
macro_rules! define_schoolhub_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolHubError {
            $($variant(String),)*
        }

        impl SchoolHubError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolHubError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolHubError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolHubError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl SchoolHubError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolHubError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_schoolhub_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Resource Conflict"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
}

impl SchoolHubError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为唯一约束冲突（SQLite / PostgreSQL / MySQL 的错误文本）
    pub fn is_unique_violation(&self) -> bool {
        let msg = self.message();
        msg.contains("UNIQUE constraint failed")
            || msg.contains("duplicate key value")
            || msg.contains("Duplicate entry")
    }
}

impl fmt::Display for SchoolHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolHubError {}

impl From<sea_orm::DbErr> for SchoolHubError {
    fn from(err: sea_orm::DbErr) -> Self {
        SchoolHubError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SchoolHubError {
    fn from(err: std::io::Error) -> Self {
        SchoolHubError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolHubError {
    fn from(err: serde_json::Error) -> Self {
        SchoolHubError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolHubError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolHubError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolHubError::database_config("test").code(), "E001");
        assert_eq!(SchoolHubError::database_operation("test").code(), "E003");
        assert_eq!(SchoolHubError::validation("test").code(), "E005");
        assert_eq!(SchoolHubError::conflict("test").code(), "E007");
        assert_eq!(SchoolHubError::authorization("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolHubError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            SchoolHubError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SchoolHubError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolHubError::not_found("Student 42 not found");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Student 42 not found"));
    }

    #[test]
    fn test_unique_violation_detection() {
        let sqlite = SchoolHubError::database_operation(
            "创建用户失败: UNIQUE constraint failed: users.email",
        );
        assert!(sqlite.is_unique_violation());

        let pg = SchoolHubError::database_operation(
            "duplicate key value violates unique constraint \"users_email_key\"",
        );
        assert!(pg.is_unique_violation());

        assert!(!SchoolHubError::database_operation("connection reset").is_unique_violation());
    }

    #[test]
    fn test_from_serde_error() {
        let err: SchoolHubError = serde_json::from_str::<Vec<i64>>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "E008");
    }
}
