//! CV photo store application layer
//!
//! Lazily opened storage, the object-URL cache and the photo use cases
//! built on top of them.

pub mod connection;
pub mod deps;
pub mod url_cache;
pub mod usecases;

pub use connection::ConnectionManager;
pub use deps::PhotoServiceDeps;
pub use url_cache::PhotoUrlCache;
pub use usecases::{OrphanReclaimer, PhotoService, PhotoServiceSettings};
