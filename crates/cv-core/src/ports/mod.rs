//! Port interfaces for the application layer
//!
//! Ports define the contract between the photo use cases and the
//! infrastructure implementations, so the core stays independent of the
//! storage engine and of how handles are minted.

mod clock;
mod id_generator;
mod object_url;
mod photo_repository;
mod storage_connector;
mod storage_estimate;

pub use clock::ClockPort;
pub use id_generator::PhotoIdGeneratorPort;
pub use object_url::ObjectUrlPort;
pub use photo_repository::{PhotoRepositoryPort, RepositoryError};
pub use storage_connector::StorageConnectorPort;
pub use storage_estimate::StorageEstimatePort;
