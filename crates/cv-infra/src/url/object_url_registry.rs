use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use cv_core::ports::ObjectUrlPort;
use cv_core::{ObjectUrl, PhotoBlob};
use tracing::{trace, warn};
use uuid::Uuid;

const URL_SCHEME: &str = "blob:cvphoto/";

/// Process-local handle table. A handle stays resolvable until revoked.
/// 进程内句柄表，句柄在被回收之前始终可解析。
#[derive(Default)]
pub struct InMemoryObjectUrlRegistry {
    live: Mutex<HashMap<ObjectUrl, PhotoBlob>>,
    created: AtomicU64,
    revoked: AtomicU64,
}

impl InMemoryObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles created and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.live
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn created_count(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }

    pub fn revoked_count(&self) -> u64 {
        self.revoked.load(Ordering::Relaxed)
    }
}

impl ObjectUrlPort for InMemoryObjectUrlRegistry {
    fn create_object_url(&self, blob: &PhotoBlob) -> ObjectUrl {
        let url = ObjectUrl::new(format!("{}{}", URL_SCHEME, Uuid::new_v4()));
        let mut live = self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        live.insert(url.clone(), blob.clone());
        self.created.fetch_add(1, Ordering::Relaxed);
        trace!(url = %url, size_bytes = blob.size_bytes, "object url created");
        url
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        let mut live = self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if live.remove(url).is_some() {
            self.revoked.fetch_add(1, Ordering::Relaxed);
            trace!(url = %url, "object url revoked");
        } else {
            warn!(url = %url, "revoke of unknown object url ignored");
        }
    }

    fn resolve(&self, url: &ObjectUrl) -> Option<PhotoBlob> {
        let live = self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        live.get(url).cloned()
    }
}
