use thiserror::Error;

/// Errors surfaced by the photo store write paths.
/// 照片存储写路径对外暴露的错误。
///
/// Read paths never return these: they degrade to `None` or an empty list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhotoError {
    /// Storage could not be opened. Retryable: the next call opens again.
    #[error("failed to open photo storage: {0}")]
    Connection(String),

    /// The storage budget is exhausted. The user must free space first.
    #[error("photo storage quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("photo storage error: {0}")]
    Storage(String),

    /// Deletion failed. Bulk deletions may have partially completed.
    #[error("failed to delete photo: {0}")]
    Delete(String),
}

impl PhotoError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, PhotoError::QuotaExceeded(_))
    }

    pub fn is_retryable(&self) -> bool {
        !self.is_quota_exceeded()
    }

    /// Message suitable for showing to the person uploading a photo.
    pub fn user_message(&self) -> &'static str {
        match self {
            PhotoError::QuotaExceeded(_) => {
                "Storage is full. Delete some photos or CVs and try again."
            }
            PhotoError::Connection(_) => "Photo storage is unavailable. Please try again.",
            PhotoError::Storage(_) => "Failed to save the photo. Please try again.",
            PhotoError::Delete(_) => "Failed to delete the photo. Please try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_message_differs_from_generic_failure() {
        let quota = PhotoError::QuotaExceeded("database or disk is full".into());
        let generic = PhotoError::Storage("database is locked".into());

        assert!(quota.is_quota_exceeded());
        assert!(!quota.is_retryable());
        assert!(generic.is_retryable());
        assert_ne!(quota.user_message(), generic.user_message());
    }
}
