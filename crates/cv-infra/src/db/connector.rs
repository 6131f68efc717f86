//! Opens the SQLite photo database on demand.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use cv_core::ports::{PhotoRepositoryPort, StorageConnectorPort};
use cv_core::PhotoStoreConfig;
use tokio::fs;
use tracing::info;

use crate::db::executor::DieselSqliteExecutor;
use crate::db::pool::{init_db_pool_with, SqlitePoolOptions};
use crate::db::repositories::DieselPhotoRepository;

pub struct SqlitePhotoConnector {
    options: SqlitePoolOptions,
}

impl SqlitePhotoConnector {
    pub fn new(options: SqlitePoolOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &PhotoStoreConfig) -> Self {
        Self::new(SqlitePoolOptions::from_config(config))
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if self.options.is_in_memory() {
            return Ok(());
        }
        if let Some(parent) = Path::new(&self.options.database_url).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl StorageConnectorPort for SqlitePhotoConnector {
    async fn open(&self) -> anyhow::Result<Arc<dyn PhotoRepositoryPort>> {
        self.ensure_parent_dir().await?;

        let options = self.options.clone();
        let pool = tokio::task::spawn_blocking(move || init_db_pool_with(&options))
            .await
            .context("Database open task panicked")??;

        info!(database = %self.options.database_url, "Photo database opened");
        Ok(Arc::new(DieselPhotoRepository::new(DieselSqliteExecutor::new(
            pool,
        ))))
    }

    /// An on-disk database can be opened when the file or its directory exists.
    fn is_available(&self) -> bool {
        if self.options.is_in_memory() {
            return true;
        }
        let path = Path::new(&self.options.database_url);
        if path.exists() {
            return true;
        }
        match path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => true,
            Some(parent) => parent.is_dir(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("photos.db");
        let connector =
            SqlitePhotoConnector::new(SqlitePoolOptions::new(db_path.to_string_lossy()));

        assert!(!connector.is_available());
        let repo = connector.open().await.unwrap();

        assert!(repo.list_projections().await.unwrap().is_empty());
        assert!(db_path.exists());
        assert!(connector.is_available());
    }

    #[test]
    fn in_memory_storage_is_always_available() {
        let connector = SqlitePhotoConnector::new(SqlitePoolOptions::new(":memory:"));
        assert!(connector.is_available());
    }
}
