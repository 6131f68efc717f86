use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use cv_core::ports::StorageEstimatePort;
use cv_core::{PhotoStoreConfig, StorageInfo};
use tokio::fs;

/// Estimates usage from the size of the database file and its sidecar files,
/// measured against the configured quota.
pub struct SqliteStorageEstimator {
    database_path: PathBuf,
    quota_bytes: u64,
    in_memory: bool,
}

impl SqliteStorageEstimator {
    pub fn new(database_path: PathBuf, quota_bytes: u64) -> Self {
        let in_memory = database_path.as_os_str() == ":memory:";
        Self {
            database_path,
            quota_bytes,
            in_memory,
        }
    }

    pub fn from_config(config: &PhotoStoreConfig) -> Self {
        Self::new(config.database_path.clone(), config.quota_bytes)
    }

    fn companion_files(&self) -> [PathBuf; 4] {
        let base = self.database_path.as_os_str().to_owned();
        let with_suffix = |suffix: &str| {
            let mut path = base.clone();
            path.push(suffix);
            PathBuf::from(path)
        };
        [
            self.database_path.clone(),
            with_suffix("-journal"),
            with_suffix("-wal"),
            with_suffix("-shm"),
        ]
    }
}

#[async_trait]
impl StorageEstimatePort for SqliteStorageEstimator {
    async fn estimate(&self) -> anyhow::Result<Option<StorageInfo>> {
        if self.in_memory || self.quota_bytes == 0 {
            return Ok(None);
        }

        let mut used = 0u64;
        for path in self.companion_files() {
            match fs::metadata(&path).await {
                Ok(meta) => used += meta.len(),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => {
                    return Err(err).with_context(|| format!("Failed to stat {}", path.display()))
                }
            }
        }

        Ok(Some(StorageInfo {
            used,
            available: self.quota_bytes.saturating_sub(used),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn estimate_counts_database_file_against_quota() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("photos.db");
        std::fs::write(&db_path, vec![0u8; 4096]).unwrap();

        let estimator = SqliteStorageEstimator::new(db_path, 10_000);
        let info = estimator.estimate().await.unwrap().unwrap();

        assert_eq!(info.used, 4096);
        assert_eq!(info.available, 10_000 - 4096);
    }

    #[tokio::test]
    async fn missing_database_reports_zero_usage() {
        let dir = tempfile::tempdir().unwrap();
        let estimator = SqliteStorageEstimator::new(dir.path().join("photos.db"), 1024);

        let info = estimator.estimate().await.unwrap().unwrap();

        assert_eq!(info, StorageInfo { used: 0, available: 1024 });
    }

    #[tokio::test]
    async fn estimate_is_unsupported_without_a_file_or_quota() {
        let in_memory = SqliteStorageEstimator::new(PathBuf::from(":memory:"), 1024);
        assert_eq!(in_memory.estimate().await.unwrap(), None);

        let unbounded = SqliteStorageEstimator::new(PathBuf::from("photos.db"), 0);
        assert_eq!(unbounded.estimate().await.unwrap(), None);
    }
}
