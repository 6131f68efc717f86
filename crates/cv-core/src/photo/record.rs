use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CvId, PhotoId};
use crate::photo::PhotoBlob;

/// Persisted photo entity.
/// 持久化的照片实体。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub id: PhotoId,
    pub cv_id: CvId,
    pub blob: PhotoBlob,
    /// Upload time (epoch millis), set once at creation.
    pub uploaded_at_ms: i64,
}

impl PhotoRecord {
    pub fn new(id: PhotoId, cv_id: CvId, blob: PhotoBlob, uploaded_at_ms: i64) -> Self {
        Self {
            id,
            cv_id,
            blob,
            uploaded_at_ms,
        }
    }

    pub fn projection(&self) -> PhotoProjection {
        PhotoProjection {
            id: self.id.clone(),
            cv_id: self.cv_id.clone(),
            uploaded_at_ms: self.uploaded_at_ms,
        }
    }
}

/// Lightweight view of a record without its payload, used by full scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoProjection {
    pub id: PhotoId,
    pub cv_id: CvId,
    pub uploaded_at_ms: i64,
}

impl PhotoProjection {
    pub fn uploaded_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.uploaded_at_ms).single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::MimeType;

    #[test]
    fn projection_drops_payload_and_keeps_association() {
        let record = PhotoRecord::new(
            PhotoId::from("photo_cv1_1_abc"),
            CvId::from("cv1"),
            PhotoBlob::new(vec![1, 2, 3], MimeType::image_png()),
            1_704_067_200_000,
        );

        let projection = record.projection();
        assert_eq!(projection.id, record.id);
        assert_eq!(projection.cv_id, record.cv_id);
        assert_eq!(
            projection.uploaded_at().map(|ts| ts.to_rfc3339()),
            Some("2024-01-01T00:00:00+00:00".to_string())
        );
    }
}
