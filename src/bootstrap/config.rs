//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - Read TOML configuration files / 读取 TOML 配置文件
//! - Parse TOML into the `PhotoStoreConfig` DTO / 将 TOML 解析为 `PhotoStoreConfig` DTO
//! - Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! No validation happens here. Whatever the file says is what the store gets.
//! 此处不做任何验证。

use std::path::{Path, PathBuf};

use anyhow::Context;
use cv_core::PhotoStoreConfig;

pub const APP_DIR_NAME: &str = "cvphoto";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<PhotoStoreConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    PhotoStoreConfig::from_toml(&toml_value)
}

/// Per-user data directory for the photo store (`<data_dir>/cvphoto`).
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .context("Could not determine the user data directory")
}

/// Pick the configuration for this run.
///
/// An explicit path must exist. Otherwise `<data_dir>/config.toml` is used when
/// present, and system defaults rooted at `data_dir` when not.
pub fn resolve_config(
    explicit: Option<&Path>,
    data_dir: &Path,
) -> anyhow::Result<PhotoStoreConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let default_path = data_dir.join(CONFIG_FILE_NAME);
    if default_path.is_file() {
        return load_config(&default_path);
    }

    Ok(PhotoStoreConfig::with_system_defaults(data_dir.to_path_buf()))
}
