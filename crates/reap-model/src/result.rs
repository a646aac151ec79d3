use serde::{Deserialize, Serialize};

use crate::JobId;

/// Outcome of the cancel stage of a reap pass.
///
/// `success` and `failed` together hold every id handed to the cancel stage,
/// each exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReapResult {
    /// Ids whose cancellation was confirmed.
    pub success: Vec<JobId>,
    /// Ids whose cancellation was attempted but not confirmed.
    pub failed: Vec<JobId>,
}

impl ReapResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for one job.
    pub fn record(&mut self, id: JobId, cancelled: bool) {
        if cancelled {
            self.success.push(id);
        } else {
            self.failed.push(id);
        }
    }

    /// Total number of recorded jobs.
    pub fn len(&self) -> usize {
        self.success.len() + self.failed.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.success.is_empty() && self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_serializes_both_lists() {
        let json = serde_json::to_string(&ReapResult::new()).unwrap();
        assert_eq!(json, r#"{"success":[],"failed":[]}"#);
    }

    #[test]
    fn record_routes_by_outcome() {
        let mut result = ReapResult::new();
        result.record("J1".into(), true);
        result.record("J2".into(), false);
        result.record("J3".into(), true);

        assert_eq!(result.success, vec!["J1", "J3"]);
        assert_eq!(result.failed, vec!["J2"]);
        assert_eq!(result.len(), 3);
        assert!(!result.is_empty());
    }
}
