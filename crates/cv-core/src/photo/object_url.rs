use serde::{Deserialize, Serialize};
use std::fmt;

/// Transient, process-local handle that dereferences to photo bytes.
///
/// Only valid until it is revoked through the issuing
/// [`ObjectUrlPort`](crate::ports::ObjectUrlPort).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
