use std::sync::Arc;

use cv_core::ports::{
    ClockPort, PhotoIdGeneratorPort, PhotoRepositoryPort, RepositoryError, StorageEstimatePort,
};
use cv_core::{
    CacheStats, CleanupReport, CvId, ObjectUrl, PhotoBlob, PhotoError, PhotoId, PhotoProjection,
    PhotoRecord, PhotoStoreConfig, ProvisionalCvPolicy, StorageInfo,
};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::connection::ConnectionManager;
use crate::deps::PhotoServiceDeps;
use crate::url_cache::PhotoUrlCache;
use crate::usecases::OrphanReclaimer;

/// Tunables of the photo service, taken from [`PhotoStoreConfig`].
#[derive(Debug, Clone)]
pub struct PhotoServiceSettings {
    pub cache_max_entries: usize,
    pub preload_limit: usize,
    pub provisional: ProvisionalCvPolicy,
}

impl PhotoServiceSettings {
    pub fn from_config(config: &PhotoStoreConfig) -> Self {
        Self {
            cache_max_entries: config.cache_max_entries,
            preload_limit: config.preload_limit,
            provisional: config.provisional.clone(),
        }
    }
}

impl Default for PhotoServiceSettings {
    fn default() -> Self {
        Self::from_config(&PhotoStoreConfig::defaults())
    }
}

/// Photo storage and lifecycle facade.
/// 照片存储与生命周期门面。
///
/// Write paths return [`PhotoError`]. Read paths never fail: errors are logged
/// and surface as `None` or an empty list. Maintenance operations report
/// problems in their return value.
pub struct PhotoService {
    connection: ConnectionManager,
    url_cache: Arc<PhotoUrlCache>,
    reclaimer: OrphanReclaimer,
    storage_estimate: Arc<dyn StorageEstimatePort>,
    clock: Arc<dyn ClockPort>,
    id_generator: Arc<dyn PhotoIdGeneratorPort>,
    preload_limit: usize,
}

fn to_store_error(err: RepositoryError) -> PhotoError {
    match err {
        RepositoryError::QuotaExceeded(msg) => PhotoError::QuotaExceeded(msg),
        RepositoryError::Storage(msg) => PhotoError::Storage(msg),
    }
}

fn to_delete_error(err: RepositoryError) -> PhotoError {
    PhotoError::Delete(err.to_string())
}

impl PhotoService {
    pub fn from_ports(deps: PhotoServiceDeps, settings: PhotoServiceSettings) -> Self {
        let url_cache = Arc::new(PhotoUrlCache::new(
            deps.object_urls,
            settings.cache_max_entries,
        ));
        Self {
            connection: ConnectionManager::new(deps.connector),
            reclaimer: OrphanReclaimer::new(Arc::clone(&url_cache), settings.provisional),
            url_cache,
            storage_estimate: deps.storage_estimate,
            clock: deps.clock,
            id_generator: deps.id_generator,
            preload_limit: settings.preload_limit,
        }
    }

    async fn repo(&self) -> Result<Arc<dyn PhotoRepositoryPort>, PhotoError> {
        self.connection.ensure_connection().await
    }

    /// Persist a photo for `cv_id` and return its freshly generated id.
    #[tracing::instrument(
        name = "usecase.store_photo.execute",
        skip(self, blob),
        fields(cv_id = %cv_id, size_bytes = blob.size_bytes, mime_type = %blob.mime_type)
    )]
    pub async fn store_photo(&self, blob: PhotoBlob, cv_id: &CvId) -> Result<PhotoId, PhotoError> {
        let repo = self.repo().await?;

        let now_ms = self.clock.now_ms();
        let id = self.id_generator.generate(cv_id, now_ms);
        let record = PhotoRecord::new(id.clone(), cv_id.clone(), blob, now_ms);

        repo.insert(&record).await.map_err(|err| {
            warn!(photo_id = %id, error = %err, "Failed to store photo");
            to_store_error(err)
        })?;

        info!(photo_id = %id, "Photo stored");
        Ok(id)
    }

    #[tracing::instrument(name = "usecase.get_photo.execute", skip(self), fields(photo_id = %id))]
    pub async fn get_photo(&self, id: &PhotoId) -> Option<PhotoBlob> {
        let repo = match self.repo().await {
            Ok(repo) => repo,
            Err(err) => {
                warn!(error = %err, "Photo lookup skipped, storage unavailable");
                return None;
            }
        };

        match repo.find_by_id(id).await {
            Ok(record) => record.map(|r| r.blob),
            Err(err) => {
                warn!(error = %err, "Failed to load photo");
                None
            }
        }
    }

    /// Cached object URL for the photo, minted on first use.
    #[tracing::instrument(name = "usecase.get_photo_url.execute", skip(self), fields(photo_id = %id))]
    pub async fn get_photo_url(&self, id: &PhotoId) -> Option<ObjectUrl> {
        if let Some(url) = self.url_cache.get(id) {
            return Some(url);
        }

        let blob = self.get_photo(id).await?;
        Some(self.url_cache.get_or_insert(id, &blob))
    }

    #[tracing::instrument(name = "usecase.delete_photo.execute", skip(self), fields(photo_id = %id))]
    pub async fn delete_photo(&self, id: &PhotoId) -> Result<(), PhotoError> {
        let repo = self
            .repo()
            .await
            .map_err(|err| PhotoError::Delete(err.to_string()))?;

        repo.delete(id).await.map_err(to_delete_error)?;
        self.url_cache.release(id);

        debug!("Photo deleted");
        Ok(())
    }

    /// Delete every photo owned by `cv_id`. Returns how many were removed.
    #[tracing::instrument(
        name = "usecase.delete_photos_by_cv_id.execute",
        skip(self),
        fields(cv_id = %cv_id)
    )]
    pub async fn delete_photos_by_cv_id(&self, cv_id: &CvId) -> Result<usize, PhotoError> {
        let repo = self
            .repo()
            .await
            .map_err(|err| PhotoError::Delete(err.to_string()))?;

        let removed = repo.delete_by_cv_id(cv_id).await.map_err(to_delete_error)?;
        for id in &removed {
            self.url_cache.release(id);
        }

        info!(count = removed.len(), "Deleted photos for CV");
        Ok(removed.len())
    }

    #[tracing::instrument(
        name = "usecase.get_photos_by_cv_id.execute",
        skip(self),
        fields(cv_id = %cv_id)
    )]
    pub async fn get_photos_by_cv_id(&self, cv_id: &CvId) -> Vec<PhotoRecord> {
        let result = match self.repo().await {
            Ok(repo) => repo.find_by_cv_id(cv_id).await.map_err(to_store_error),
            Err(err) => Err(err),
        };
        result.unwrap_or_else(|err| {
            warn!(error = %err, "Failed to list photos for CV");
            Vec::new()
        })
    }

    #[tracing::instrument(name = "usecase.get_all_photos_with_cv_ids.execute", skip(self))]
    pub async fn get_all_photos_with_cv_ids(&self) -> Vec<PhotoProjection> {
        let result = match self.repo().await {
            Ok(repo) => repo.list_projections().await.map_err(to_store_error),
            Err(err) => Err(err),
        };
        result.unwrap_or_else(|err| {
            warn!(error = %err, "Failed to list photos");
            Vec::new()
        })
    }

    /// Move a photo to another CV. Missing photos and failures are logged, never returned.
    #[tracing::instrument(
        name = "usecase.update_photo_cv_id.execute",
        skip(self),
        fields(photo_id = %id, new_cv_id = %new_cv_id)
    )]
    pub async fn update_photo_cv_id(&self, id: &PhotoId, new_cv_id: &CvId) {
        let repo = match self.repo().await {
            Ok(repo) => repo,
            Err(err) => {
                warn!(error = %err, "Photo reassignment skipped, storage unavailable");
                return;
            }
        };

        match repo.update_cv_id(id, new_cv_id).await {
            Ok(true) => debug!("Photo reassigned"),
            Ok(false) => debug!("Photo not found, nothing to reassign"),
            Err(err) => warn!(error = %err, "Failed to reassign photo"),
        }
    }

    /// Delete photos whose CV is neither in `existing_cv_ids` nor provisional.
    pub async fn cleanup_orphaned_photos(&self, existing_cv_ids: &[CvId]) -> CleanupReport {
        match self.repo().await {
            Ok(repo) => self.reclaimer.execute(repo.as_ref(), existing_cv_ids).await,
            Err(err) => {
                warn!(error = %err, "Orphan cleanup skipped, storage unavailable");
                CleanupReport::scan_failed(err)
            }
        }
    }

    pub async fn get_storage_info(&self) -> Option<StorageInfo> {
        match self.storage_estimate.estimate().await {
            Ok(info) => info,
            Err(err) => {
                warn!(error = %err, "Storage estimate failed");
                None
            }
        }
    }

    pub fn get_cache_stats(&self) -> CacheStats {
        self.url_cache.stats()
    }

    pub fn clear_url_cache(&self) {
        let released = self.url_cache.clear();
        debug!(released, "Photo URL cache cleared");
    }

    /// Warm the URL cache for up to `preload_limit` uncached ids, concurrently.
    #[tracing::instrument(name = "usecase.preload_photos.execute", skip(self, ids), fields(requested = ids.len()))]
    pub async fn preload_photos(&self, ids: &[PhotoId]) {
        let pending: Vec<&PhotoId> = ids
            .iter()
            .filter(|id| !self.url_cache.contains(id))
            .take(self.preload_limit)
            .collect();

        let loaded = join_all(pending.iter().map(|id| self.get_photo_url(id)))
            .await
            .into_iter()
            .filter(Option::is_some)
            .count();

        debug!(attempted = pending.len(), loaded, "Preload finished");
    }

    /// Drop the storage handle and every cached URL. The next call reopens storage.
    pub fn close_connection(&self) {
        let had_connection = self.connection.close();
        let released = self.url_cache.clear();
        info!(had_connection, released, "Photo storage connection closed");
    }

    /// Side-effect-free probe of whether storage can be opened.
    pub fn is_storage_available(&self) -> bool {
        self.connection.is_storage_available()
    }
}
