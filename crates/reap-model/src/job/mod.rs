mod creation;
pub use creation::CreationTime;

mod cancel;
pub use cancel::{CallStatus, CancelResponse};

use serde::{Deserialize, Deserializer, Serialize};

use crate::{JobId, ModelError, ModelResult};

/// Active job as reported by the control plane inventory.
///
/// Only `id` is required to decode. A missing, `null` or non-string
/// `creationTime` decodes as `None` and fails later in [`Job::creation`], so
/// one bad record is skipped instead of rejecting the whole listing.
/// The other fields are carried for diagnostics. Unknown fields are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Control-plane job identifier.
    pub id: JobId,
    /// Creation timestamp, `YYYY-MM-DD HH:MM:SS` in UTC.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_time: Option<String>,
    /// Human-readable job name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Current job state (e.g. `Running`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Region the job runs in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Job {
    /// Create a job record with only the fields the reaper needs.
    pub fn new(id: impl Into<JobId>, creation_time: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            creation_time: Some(creation_time.into()),
            name: None,
            state: None,
            location: None,
        }
    }

    /// Parse [`Job::creation_time`].
    pub fn creation(&self) -> ModelResult<CreationTime> {
        match &self.creation_time {
            Some(raw) => CreationTime::parse(raw),
            None => Err(ModelError::InvalidCreationTime {
                value: String::new(),
                reason: "missing or not a string".into(),
            }),
        }
    }

    /// Decode a JSON inventory listing (an array of job objects).
    pub fn list_from_json(raw: &[u8]) -> ModelResult<Vec<Job>> {
        serde_json::from_slice(raw).map_err(|e| ModelError::InvalidListing(e.to_string()))
    }
}

/// Keep string values, turn anything else (`null`, numbers, objects) into `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_inventory_listing() {
        let raw = br#"[
            {
                "createTime": "2020-01-29T20:48:36.123Z",
                "creationTime": "2020-01-29 20:48:36",
                "id": "2020-01-29_12_48_35-1234567890",
                "location": "us-central1",
                "name": "wordcount",
                "state": "Running",
                "stateTime": "2020-01-29 20:49:10",
                "type": "Streaming"
            },
            {"id": "J2", "creationTime": "2024-01-01 23:50:00"}
        ]"#;

        let jobs = Job::list_from_json(raw).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, "2020-01-29_12_48_35-1234567890");
        assert_eq!(jobs[0].state.as_deref(), Some("Running"));
        assert_eq!(jobs[1], Job::new("J2", "2024-01-01 23:50:00"));
    }

    #[test]
    fn empty_listing_is_ok() {
        assert!(Job::list_from_json(b"[]").unwrap().is_empty());
    }

    #[test]
    fn bad_creation_time_decodes_and_fails_per_job() {
        let raw = br#"[
            {"id": "J0", "creationTime": null},
            {"id": "J1"},
            {"id": "J2", "creationTime": 1704067200},
            {"id": "J3", "creationTime": "2024-01-01 00:00:00"}
        ]"#;

        let jobs = Job::list_from_json(raw).unwrap();
        assert_eq!(jobs.len(), 4);
        for job in &jobs[..3] {
            assert_eq!(job.creation_time, None);
            assert!(matches!(
                job.creation(),
                Err(ModelError::InvalidCreationTime { .. })
            ));
        }
        assert!(jobs[3].creation().is_ok());
    }

    #[test]
    fn listing_without_id_is_rejected() {
        let err = Job::list_from_json(br#"[{"creationTime": "2024-01-01 00:00:00"}]"#).unwrap_err();
        assert!(matches!(err, ModelError::InvalidListing(_)));
    }

    #[test]
    fn non_array_listing_is_rejected() {
        assert!(Job::list_from_json(b"ERROR: permission denied").is_err());
        assert!(Job::list_from_json(br#"{"id": "J1"}"#).is_err());
    }
}
