pub mod db;
pub mod ids;
pub mod time;
pub mod url;

pub use db::connector::SqlitePhotoConnector;
pub use db::storage_estimate::SqliteStorageEstimator;
pub use ids::RandomPhotoIdGenerator;
pub use time::SystemClock;
pub use url::InMemoryObjectUrlRegistry;
