//! Photo use cases
//!
//! [`PhotoService`] is the facade the rest of the application talks to;
//! [`OrphanReclaimer`] is the maintenance pass it delegates cleanup to.

pub mod cleanup_orphaned_photos;
pub mod photo_service;

pub use cleanup_orphaned_photos::OrphanReclaimer;
pub use photo_service::{PhotoService, PhotoServiceSettings};
