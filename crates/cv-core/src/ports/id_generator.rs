use crate::ids::{CvId, PhotoId};

/// Generates globally unique photo ids.
pub trait PhotoIdGeneratorPort: Send + Sync {
    fn generate(&self, cv_id: &CvId, now_ms: i64) -> PhotoId;
}
