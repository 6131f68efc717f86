use std::collections::HashSet;
use std::sync::Arc;

use cv_core::ports::PhotoRepositoryPort;
use cv_core::{CleanupReport, CvId, ProvisionalCvPolicy};
use tracing::{info, warn};

use crate::url_cache::PhotoUrlCache;

/// Reclaims photos whose owning CV no longer exists.
/// 回收所属 CV 已不存在的照片。
///
/// A photo is an orphan when its CV id is not in the caller's known set and
/// is not provisional. Each orphan is deleted on its own; one failure does
/// not stop the pass.
pub struct OrphanReclaimer {
    url_cache: Arc<PhotoUrlCache>,
    provisional: ProvisionalCvPolicy,
}

impl OrphanReclaimer {
    pub fn new(url_cache: Arc<PhotoUrlCache>, provisional: ProvisionalCvPolicy) -> Self {
        Self {
            url_cache,
            provisional,
        }
    }

    #[tracing::instrument(
        name = "usecase.cleanup_orphaned_photos.execute",
        skip(self, repo, existing_cv_ids),
        fields(known_cvs = existing_cv_ids.len())
    )]
    pub async fn execute(
        &self,
        repo: &dyn PhotoRepositoryPort,
        existing_cv_ids: &[CvId],
    ) -> CleanupReport {
        let projections = match repo.list_projections().await {
            Ok(projections) => projections,
            Err(err) => {
                warn!(error = %err, "Orphan scan failed");
                return CleanupReport::scan_failed(err);
            }
        };

        let existing: HashSet<&CvId> = existing_cv_ids.iter().collect();
        let mut report = CleanupReport::default();

        for photo in projections
            .iter()
            .filter(|p| !existing.contains(&p.cv_id) && !self.provisional.is_provisional(&p.cv_id))
        {
            match repo.delete(&photo.id).await {
                Ok(()) => {
                    self.url_cache.release(&photo.id);
                    report.cleaned += 1;
                }
                Err(err) => {
                    warn!(photo_id = %photo.id, error = %err, "Failed to reclaim orphaned photo");
                    report
                        .errors
                        .push(format!("Failed to delete photo {}: {}", photo.id, err));
                }
            }
        }

        info!(
            scanned = projections.len(),
            cleaned = report.cleaned,
            failed = report.errors.len(),
            "Orphan cleanup finished"
        );
        report
    }
}
