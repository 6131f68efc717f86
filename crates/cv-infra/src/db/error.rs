use cv_core::ports::RepositoryError;
use diesel::result::Error as DieselError;

/// SQLite reports an exhausted page budget (`max_page_count`) or a full disk as SQLITE_FULL.
const SQLITE_FULL_MESSAGE: &str = "database or disk is full";

/// Map an executor error onto the repository taxonomy.
///
/// Only storage exhaustion is singled out; everything else is a generic storage failure.
pub fn classify(err: anyhow::Error) -> RepositoryError {
    let quota = err.chain().any(|cause| match cause.downcast_ref::<DieselError>() {
        Some(DieselError::DatabaseError(..)) | None => is_quota_message(&cause.to_string()),
        Some(_) => false,
    });

    if quota {
        RepositoryError::QuotaExceeded(format!("{:#}", err))
    } else {
        RepositoryError::Storage(format!("{:#}", err))
    }
}

fn is_quota_message(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains(SQLITE_FULL_MESSAGE) || message.contains("quota")
}
