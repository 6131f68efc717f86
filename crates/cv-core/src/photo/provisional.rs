//! Provisional CV ids.
//!
//! A CV that has not been saved yet owns its photos under a provisional id
//! (an exact sentinel such as `temp`, or an id with a provisional prefix).
//! Photos attached to such ids are never treated as orphans.

use serde::{Deserialize, Serialize};

use crate::ids::CvId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionalCvPolicy {
    /// Exact ids that mark a provisional CV.
    pub sentinels: Vec<String>,
    /// Prefixes that mark a provisional CV.
    pub prefixes: Vec<String>,
}

impl ProvisionalCvPolicy {
    pub fn new(sentinels: Vec<String>, prefixes: Vec<String>) -> Self {
        Self {
            sentinels,
            prefixes,
        }
    }

    pub fn is_provisional(&self, cv_id: &CvId) -> bool {
        let id = cv_id.as_str();
        self.sentinels.iter().any(|s| s == id)
            || self
                .prefixes
                .iter()
                .any(|p| !p.is_empty() && id.starts_with(p.as_str()))
    }
}

impl Default for ProvisionalCvPolicy {
    fn default() -> Self {
        Self {
            sentinels: vec!["temp".to_string()],
            prefixes: vec!["temp_".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_sentinel_and_prefix() {
        let policy = ProvisionalCvPolicy::default();
        assert!(policy.is_provisional(&CvId::from("temp")));
        assert!(policy.is_provisional(&CvId::from("temp_1718000000000")));
        assert!(!policy.is_provisional(&CvId::from("template")));
        assert!(!policy.is_provisional(&CvId::from("cv1")));
    }

    #[test]
    fn empty_prefix_never_matches_everything() {
        let policy = ProvisionalCvPolicy::new(vec![], vec![String::new()]);
        assert!(!policy.is_provisional(&CvId::from("cv1")));
    }
}
