use anyhow::Result;
use async_trait::async_trait;

use crate::photo::StorageInfo;

/// Storage-quota estimation capability of the platform.
#[async_trait]
pub trait StorageEstimatePort: Send + Sync {
    /// `Ok(None)` when the platform cannot estimate usage.
    async fn estimate(&self) -> Result<Option<StorageInfo>>;
}
