use crate::photo::{ObjectUrl, PhotoBlob};

/// Issues and revokes transient handles for photo payloads.
/// 为照片负载签发与回收临时句柄。
///
/// Every handle returned by `create_object_url` stays alive until it is passed
/// to `revoke_object_url`. Callers own that pairing.
pub trait ObjectUrlPort: Send + Sync {
    fn create_object_url(&self, blob: &PhotoBlob) -> ObjectUrl;

    /// Revoking an unknown or already revoked handle is a no-op.
    fn revoke_object_url(&self, url: &ObjectUrl);

    /// Dereference a live handle.
    fn resolve(&self, url: &ObjectUrl) -> Option<PhotoBlob>;
}
