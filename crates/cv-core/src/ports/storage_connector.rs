use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::ports::PhotoRepositoryPort;

/// Opens the underlying storage engine.
///
/// Each successful `open` yields an independent handle; callers are expected
/// to keep at most one alive (see the connection manager in `cv-app`).
#[async_trait]
pub trait StorageConnectorPort: Send + Sync {
    async fn open(&self) -> Result<Arc<dyn PhotoRepositoryPort>>;

    /// Side-effect-free capability probe.
    fn is_available(&self) -> bool;
}
