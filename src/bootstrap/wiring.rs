//! # Dependency Injection / 依赖注入模块
//!
//! Creates the infra implementations and injects them into [`PhotoService`].
//! This is the only place that depends on `cv-infra` and `cv-app` together,
//! and it only assembles: storage is not opened here.
//! 这是唯一同时依赖 `cv-infra` 与 `cv-app` 的地方，只负责组装。

use std::sync::Arc;

use cv_app::{PhotoService, PhotoServiceDeps, PhotoServiceSettings};
use cv_core::ports::*;
use cv_core::PhotoStoreConfig;
use cv_infra::{
    InMemoryObjectUrlRegistry, RandomPhotoIdGenerator, SqlitePhotoConnector,
    SqliteStorageEstimator, SystemClock,
};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Invalid database path: {0}")]
    DatabasePath(String),
}

/// Infrastructure layer implementations / 基础设施层实现
struct InfraLayer {
    connector: Arc<dyn StorageConnectorPort>,
    storage_estimate: Arc<dyn StorageEstimatePort>,
    object_urls: Arc<dyn ObjectUrlPort>,
    clock: Arc<dyn ClockPort>,
    id_generator: Arc<dyn PhotoIdGeneratorPort>,
}

fn create_infra_layer(config: &PhotoStoreConfig) -> WiringResult<InfraLayer> {
    // The SQLite URL is a plain string; refuse paths that would be mangled.
    if config.database_path.to_str().is_none() {
        return Err(WiringError::DatabasePath(
            config.database_path.display().to_string(),
        ));
    }
    if config.database_path.as_os_str().is_empty() {
        return Err(WiringError::DatabasePath("empty path".to_string()));
    }

    Ok(InfraLayer {
        connector: Arc::new(SqlitePhotoConnector::from_config(config)),
        storage_estimate: Arc::new(SqliteStorageEstimator::from_config(config)),
        object_urls: Arc::new(InMemoryObjectUrlRegistry::new()),
        clock: Arc::new(SystemClock),
        id_generator: Arc::new(RandomPhotoIdGenerator::new()),
    })
}

/// Assemble a [`PhotoService`] for `config`
/// 根据配置组装 [`PhotoService`]
///
/// Storage is opened lazily by the first operation that needs it.
pub fn build_photo_service(config: &PhotoStoreConfig) -> WiringResult<PhotoService> {
    let infra = create_infra_layer(config)?;

    tracing::debug!(
        database = %config.database_path.display(),
        quota_bytes = config.quota_bytes,
        cache_max_entries = config.cache_max_entries,
        "Wiring photo service"
    );

    Ok(PhotoService::from_ports(
        PhotoServiceDeps {
            connector: infra.connector,
            storage_estimate: infra.storage_estimate,
            object_urls: infra.object_urls,
            clock: infra.clock,
            id_generator: infra.id_generator,
        },
        PhotoServiceSettings::from_config(config),
    ))
}
