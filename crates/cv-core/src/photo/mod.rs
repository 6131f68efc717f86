mod blob;
mod object_url;
mod provisional;
mod record;
mod report;

pub use blob::{MimeType, PhotoBlob};
pub use object_url::ObjectUrl;
pub use provisional::ProvisionalCvPolicy;
pub use record::{PhotoProjection, PhotoRecord};
pub use report::{CacheStats, CleanupReport, StorageInfo};
