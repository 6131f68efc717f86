use async_trait::async_trait;
use thiserror::Error;

use crate::ids::{CvId, PhotoId};
use crate::photo::{PhotoProjection, PhotoRecord};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// The engine rejected a write because the storage budget is exhausted.
    #[error("storage quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Durable photo records keyed by id, indexed by owning CV.
/// 以 ID 为主键、按所属 CV 建立索引的照片持久化存储。
#[async_trait]
pub trait PhotoRepositoryPort: Send + Sync {
    async fn insert(&self, record: &PhotoRecord) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &PhotoId) -> Result<Option<PhotoRecord>, RepositoryError>;

    /// Deleting a missing id succeeds.
    async fn delete(&self, id: &PhotoId) -> Result<(), RepositoryError>;

    async fn find_by_cv_id(&self, cv_id: &CvId) -> Result<Vec<PhotoRecord>, RepositoryError>;

    /// Delete every record owned by `cv_id` and return the removed ids.
    ///
    /// Implementations are not required to be atomic across records: on
    /// error, records removed before the failure stay removed.
    async fn delete_by_cv_id(&self, cv_id: &CvId) -> Result<Vec<PhotoId>, RepositoryError>;

    /// Re-associate a record. Returns `false` when the record does not exist.
    async fn update_cv_id(&self, id: &PhotoId, new_cv_id: &CvId) -> Result<bool, RepositoryError>;

    /// Full scan without payloads.
    async fn list_projections(&self) -> Result<Vec<PhotoProjection>, RepositoryError>;
}
