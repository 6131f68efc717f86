use anyhow::Result;
use cv_core::{CvId, MimeType, PhotoBlob, PhotoId, PhotoProjection, PhotoRecord};

use crate::db::models::{NewPhotoRow, PhotoProjectionRow, PhotoRow};
use crate::db::ports::RowMapper;

pub struct PhotoRowMapper;

impl PhotoRowMapper {
    pub fn to_row<'a>(&self, domain: &'a PhotoRecord) -> NewPhotoRow<'a> {
        NewPhotoRow {
            id: domain.id.as_str(),
            cv_id: domain.cv_id.as_str(),
            data: &domain.blob.bytes,
            mime_type: domain.blob.mime_type.as_str(),
            size_bytes: domain.blob.size_bytes,
            uploaded_at_ms: domain.uploaded_at_ms,
        }
    }
}

impl RowMapper<PhotoRow, PhotoRecord> for PhotoRowMapper {
    fn to_domain(&self, row: &PhotoRow) -> Result<PhotoRecord> {
        if row.size_bytes != row.data.len() as i64 {
            return Err(anyhow::anyhow!(
                "photo {} is corrupt: recorded size {} but payload has {} bytes",
                row.id,
                row.size_bytes,
                row.data.len()
            ));
        }

        Ok(PhotoRecord::new(
            PhotoId::from(row.id.clone()),
            CvId::from(row.cv_id.clone()),
            PhotoBlob::new(row.data.clone(), MimeType(row.mime_type.clone())),
            row.uploaded_at_ms,
        ))
    }
}

impl RowMapper<PhotoProjectionRow, PhotoProjection> for PhotoRowMapper {
    fn to_domain(&self, row: &PhotoProjectionRow) -> Result<PhotoProjection> {
        Ok(PhotoProjection {
            id: PhotoId::from(row.id.clone()),
            cv_id: CvId::from(row.cv_id.clone()),
            uploaded_at_ms: row.uploaded_at_ms,
        })
    }
}
