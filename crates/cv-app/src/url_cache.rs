//! Bounded photo id → object URL cache.
//!
//! Entries are kept in insertion order. When the cache is full, the oldest
//! half is evicted before the next insert and every evicted handle is
//! revoked. Access recency is not tracked.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cv_core::ports::ObjectUrlPort;
use cv_core::{CacheStats, ObjectUrl, PhotoBlob, PhotoId};
use tracing::debug;

#[derive(Default)]
struct CacheEntries {
    urls: HashMap<PhotoId, ObjectUrl>,
    order: VecDeque<PhotoId>,
}

pub struct PhotoUrlCache {
    object_urls: Arc<dyn ObjectUrlPort>,
    max_size: usize,
    entries: Mutex<CacheEntries>,
}

impl PhotoUrlCache {
    /// `max_size` below one is raised to one.
    pub fn new(object_urls: Arc<dyn ObjectUrlPort>, max_size: usize) -> Self {
        Self {
            object_urls,
            max_size: max_size.max(1),
            entries: Mutex::new(CacheEntries::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheEntries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, id: &PhotoId) -> Option<ObjectUrl> {
        self.lock().urls.get(id).cloned()
    }

    pub fn contains(&self, id: &PhotoId) -> bool {
        self.lock().urls.contains_key(id)
    }

    /// Return the cached handle for `id`, or mint one from `blob` and cache it.
    ///
    /// Runs under the cache lock, so racing callers for the same id end up
    /// sharing a single live handle.
    pub fn get_or_insert(&self, id: &PhotoId, blob: &PhotoBlob) -> ObjectUrl {
        let mut entries = self.lock();
        if let Some(url) = entries.urls.get(id) {
            return url.clone();
        }

        if entries.urls.len() >= self.max_size {
            self.evict_oldest_half(&mut entries);
        }

        let url = self.object_urls.create_object_url(blob);
        entries.urls.insert(id.clone(), url.clone());
        entries.order.push_back(id.clone());
        url
    }

    fn evict_oldest_half(&self, entries: &mut CacheEntries) {
        let count = (entries.urls.len() / 2).max(1);
        for _ in 0..count {
            let Some(id) = entries.order.pop_front() else {
                break;
            };
            if let Some(url) = entries.urls.remove(&id) {
                self.object_urls.revoke_object_url(&url);
            }
        }
        debug!(evicted = count, remaining = entries.urls.len(), "Evicted oldest photo URLs");
    }

    /// Revoke and forget the handle for `id`. Returns `false` if none was cached.
    pub fn release(&self, id: &PhotoId) -> bool {
        let mut entries = self.lock();
        match entries.urls.remove(id) {
            Some(url) => {
                entries.order.retain(|cached| cached != id);
                self.object_urls.revoke_object_url(&url);
                true
            }
            None => false,
        }
    }

    /// Revoke every handle. Returns how many were released.
    pub fn clear(&self) -> usize {
        let mut entries = self.lock();
        let released = entries.urls.len();
        for (_, url) in entries.urls.drain() {
            self.object_urls.revoke_object_url(&url);
        }
        entries.order.clear();
        released
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.lock().urls.len(),
            max_size: self.max_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use cv_core::MimeType;
    use cv_infra::InMemoryObjectUrlRegistry;

    use super::*;

    fn blob(byte: u8) -> PhotoBlob {
        PhotoBlob::new(vec![byte; 8], MimeType::image_jpeg())
    }

    fn cache(max_size: usize) -> (Arc<InMemoryObjectUrlRegistry>, PhotoUrlCache) {
        let registry = Arc::new(InMemoryObjectUrlRegistry::new());
        let cache = PhotoUrlCache::new(registry.clone(), max_size);
        (registry, cache)
    }

    #[test]
    fn repeated_lookup_returns_same_handle_without_minting() {
        let (registry, cache) = cache(4);
        let id = PhotoId::from("p1");

        let first = cache.get_or_insert(&id, &blob(1));
        let second = cache.get_or_insert(&id, &blob(1));

        assert_eq!(first, second);
        assert_eq!(registry.created_count(), 1);
    }

    #[test]
    fn full_cache_evicts_oldest_half_in_insertion_order() {
        let (registry, cache) = cache(4);
        let ids: Vec<PhotoId> = (0..5).map(|i| PhotoId::from(format!("p{i}"))).collect();

        for (i, id) in ids.iter().enumerate() {
            cache.get_or_insert(id, &blob(i as u8));
            assert!(cache.stats().size <= 4);
        }

        // p0 and p1 went out when p4 arrived.
        assert!(!cache.contains(&ids[0]));
        assert!(!cache.contains(&ids[1]));
        assert!(cache.contains(&ids[2]));
        assert!(cache.contains(&ids[4]));
        assert_eq!(cache.stats(), CacheStats { size: 3, max_size: 4 });
        assert_eq!(registry.revoked_count(), 2);
        assert_eq!(registry.live_count(), 3);
    }

    #[test]
    fn cache_of_one_evicts_the_single_entry() {
        let (registry, cache) = cache(1);

        cache.get_or_insert(&PhotoId::from("a"), &blob(1));
        cache.get_or_insert(&PhotoId::from("b"), &blob(2));

        assert!(!cache.contains(&PhotoId::from("a")));
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn released_entry_does_not_linger_in_eviction_order() {
        let (registry, cache) = cache(2);
        let a = PhotoId::from("a");
        let b = PhotoId::from("b");
        let c = PhotoId::from("c");

        cache.get_or_insert(&a, &blob(1));
        assert!(cache.release(&a));
        assert!(!cache.release(&a));

        cache.get_or_insert(&b, &blob(2));
        cache.get_or_insert(&c, &blob(3));

        assert!(cache.contains(&b));
        assert!(cache.contains(&c));
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn clear_revokes_everything_and_is_idempotent() {
        let (registry, cache) = cache(10);
        for i in 0..3 {
            cache.get_or_insert(&PhotoId::from(format!("p{i}")), &blob(i));
        }

        assert_eq!(cache.clear(), 3);
        assert_eq!(cache.clear(), 0);
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.created_count(), registry.revoked_count());
        assert_eq!(cache.stats().size, 0);
    }
}
