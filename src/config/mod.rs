//! 配置管理
//!
//! 配置来源依次为 `config.toml`、`config.{APP_ENV}.toml`、`SCHOOLHUB__*` 环境变量。

mod r#impl;
mod structs;

pub use structs::*;
