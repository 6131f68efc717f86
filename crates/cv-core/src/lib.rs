//! # cv-core
//!
//! Core domain models and ports for the CV photo store.
//!
//! This crate contains pure domain logic without any infrastructure dependencies.
//! Storage engines, handle registries and clocks are reached through [`ports`].

pub mod config;
pub mod error;
pub mod ids;
pub mod photo;
pub mod ports;

// Re-export commonly used types at the crate root
pub use config::PhotoStoreConfig;
pub use error::PhotoError;
pub use ids::{CvId, PhotoId};
pub use photo::{
    CacheStats, CleanupReport, MimeType, ObjectUrl, PhotoBlob, PhotoProjection, PhotoRecord,
    ProvisionalCvPolicy, StorageInfo,
};
