//! # Pure Data Module / 纯数据模块
//!
//! Configuration data structures and the TOML → DTO mapping.
//! Missing keys fall back to [`PhotoStoreConfig::defaults`]; no other
//! validation happens here.

use std::path::PathBuf;

use crate::photo::ProvisionalCvPolicy;

pub const DEFAULT_MAX_CACHE_SIZE: usize = 50;
pub const DEFAULT_PRELOAD_LIMIT: usize = 10;
pub const DATABASE_FILE_NAME: &str = "photos.db";
pub const DEFAULT_QUOTA_BYTES: u64 = 50 * 1024 * 1024;

/// Photo store configuration DTO
/// 照片存储配置 DTO
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoStoreConfig {
    /// SQLite database path, or `:memory:`
    pub database_path: PathBuf,

    /// Storage budget in bytes. `0` means no budget beyond the disk itself
    /// (and no usage estimate).
    pub quota_bytes: u64,

    pub pool_size: u32,

    pub connect_timeout_secs: u64,

    /// Maximum number of cached object URLs
    pub cache_max_entries: usize,

    /// Maximum number of photos fetched by one preload call
    pub preload_limit: usize,

    /// CV ids whose photos are never reclaimed as orphans
    pub provisional: ProvisionalCvPolicy,

    /// Directory for the log file. Empty disables file logging.
    pub log_dir: PathBuf,
}

impl PhotoStoreConfig {
    pub fn defaults() -> Self {
        Self {
            database_path: PathBuf::from(DATABASE_FILE_NAME),
            quota_bytes: DEFAULT_QUOTA_BYTES,
            pool_size: 4,
            connect_timeout_secs: 5,
            cache_max_entries: DEFAULT_MAX_CACHE_SIZE,
            preload_limit: DEFAULT_PRELOAD_LIMIT,
            provisional: ProvisionalCvPolicy::default(),
            log_dir: PathBuf::new(),
        }
    }

    /// Configuration backed by a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            database_path: PathBuf::from(":memory:"),
            ..Self::defaults()
        }
    }

    /// Create config with system-default paths rooted at `data_dir`
    /// 使用以 `data_dir` 为根的系统默认路径创建配置
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join(DATABASE_FILE_NAME),
            log_dir: data_dir.join("logs"),
            ..Self::defaults()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == ":memory:"
    }

    /// Create config from a TOML value
    /// 从 TOML 值创建配置
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::defaults();
        let section = |name: &str, key: &str| toml_value.get(name).and_then(|s| s.get(key));

        let strings = |name: &str, key: &str, fallback: &[String]| -> Vec<String> {
            section(name, key)
                .and_then(|v| v.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_else(|| fallback.to_vec())
        };

        Ok(Self {
            database_path: section("storage", "database_path")
                .and_then(|v| v.as_str())
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            quota_bytes: section("storage", "quota_bytes")
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(defaults.quota_bytes),
            pool_size: section("storage", "pool_size")
                .and_then(|v| v.as_integer())
                .map(|v| v as u32)
                .unwrap_or(defaults.pool_size),
            connect_timeout_secs: section("storage", "connect_timeout_secs")
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(defaults.connect_timeout_secs),
            cache_max_entries: section("cache", "max_entries")
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as usize)
                .unwrap_or(defaults.cache_max_entries),
            preload_limit: section("cache", "preload_limit")
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as usize)
                .unwrap_or(defaults.preload_limit),
            provisional: ProvisionalCvPolicy::new(
                strings("cleanup", "provisional_ids", &defaults.provisional.sentinels),
                strings("cleanup", "provisional_prefixes", &defaults.provisional.prefixes),
            ),
            log_dir: section("logging", "dir")
                .and_then(|v| v.as_str())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
        })
    }
}

impl Default for PhotoStoreConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_uses_defaults_when_sections_missing() {
        let toml_value: Value = toml::from_str("").unwrap();

        let config = PhotoStoreConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config, PhotoStoreConfig::defaults());
        assert_eq!(config.cache_max_entries, 50);
        assert_eq!(config.preload_limit, 10);
    }

    #[test]
    fn test_from_toml_parses_all_sections() {
        let toml_str = r#"
            [storage]
            database_path = "/data/photos.db"
            quota_bytes = 1048576
            pool_size = 2

            [cache]
            max_entries = 8
            preload_limit = 3

            [cleanup]
            provisional_ids = ["draft"]
            provisional_prefixes = ["draft-", "new-"]

            [logging]
            dir = "/data/logs"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = PhotoStoreConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.database_path, PathBuf::from("/data/photos.db"));
        assert_eq!(config.quota_bytes, 1_048_576);
        assert_eq!(config.pool_size, 2);
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.cache_max_entries, 8);
        assert_eq!(config.preload_limit, 3);
        assert_eq!(config.provisional.sentinels, vec!["draft".to_string()]);
        assert_eq!(
            config.provisional.prefixes,
            vec!["draft-".to_string(), "new-".to_string()]
        );
        assert_eq!(config.log_dir, PathBuf::from("/data/logs"));
    }

    #[test]
    fn test_negative_quota_is_treated_as_unbounded() {
        let toml_value: Value = toml::from_str("[storage]\nquota_bytes = -5").unwrap();

        let config = PhotoStoreConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.quota_bytes, 0);
    }

    #[test]
    fn test_with_system_defaults_creates_paths_under_data_dir() {
        let config = PhotoStoreConfig::with_system_defaults(PathBuf::from("/tmp/test"));

        assert_eq!(config.database_path, PathBuf::from("/tmp/test/photos.db"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/test/logs"));
        assert!(!config.is_in_memory());
        assert!(PhotoStoreConfig::in_memory().is_in_memory());
    }
}
