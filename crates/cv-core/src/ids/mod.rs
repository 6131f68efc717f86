//! ID type wrappers for type safety.

mod id_macro;

use serde::{Deserialize, Serialize};

use id_macro::impl_id;

/// Identifier of a stored photo.
///
/// Generated ids have the form `photo_<cvId>_<unix-millis>_<salt>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(String);

/// Identifier of the CV that owns a photo. The CV registry lives outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CvId(String);

impl_id!(PhotoId, CvId);

impl PhotoId {
    pub const PREFIX: &'static str = "photo";

    /// Compose a photo id from its owning CV, creation time and random salt.
    pub fn compose(cv_id: &CvId, timestamp_ms: i64, salt: &str) -> Self {
        Self(format!("{}_{}_{}_{}", Self::PREFIX, cv_id, timestamp_ms, salt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_follows_photo_cv_timestamp_salt_layout() {
        let id = PhotoId::compose(&CvId::from("cv1"), 1_704_067_200_000, "k3j9x0a1b");
        assert_eq!(id.as_str(), "photo_cv1_1704067200000_k3j9x0a1b");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&CvId::from("cv-42")).unwrap();
        assert_eq!(json, "\"cv-42\"");
    }
}
