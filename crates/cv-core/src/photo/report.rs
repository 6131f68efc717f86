use serde::{Deserialize, Serialize};

/// Point-in-time view of the URL cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
}

/// Outcome of an orphan cleanup pass.
///
/// `cleaned` counts successful deletions only; each failure adds one
/// human-readable line to `errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    pub cleaned: usize,
    pub errors: Vec<String>,
}

impl CleanupReport {
    pub fn scan_failed(cause: impl std::fmt::Display) -> Self {
        Self {
            cleaned: 0,
            errors: vec![format!("Failed to scan photos: {}", cause)],
        }
    }
}

/// Advisory storage usage in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
    pub used: u64,
    pub available: u64,
}
