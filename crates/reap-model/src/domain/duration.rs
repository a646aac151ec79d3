use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MAX_DURATION_MINUTES, ModelError};

/// Maximum running time, in whole minutes, a job may reach before it is reaped.
///
/// The comparison is strict: a job is over the limit only when its elapsed
/// minutes are *greater* than this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaxDuration(u64);

impl MaxDuration {
    /// Create a threshold of `minutes`.
    #[inline]
    pub const fn from_minutes(minutes: u64) -> Self {
        Self(minutes)
    }

    /// Returns the threshold in minutes.
    #[inline]
    pub const fn minutes(&self) -> u64 {
        self.0
    }

    /// Whether a job that has been running for `elapsed_minutes` violates this threshold.
    ///
    /// Negative elapsed values (clock skew, creation time in the future) never violate.
    pub fn is_exceeded_by(&self, elapsed_minutes: i64) -> bool {
        match u64::try_from(elapsed_minutes) {
            Ok(elapsed) => elapsed > self.0,
            Err(_) => false,
        }
    }
}

impl Default for MaxDuration {
    fn default() -> Self {
        Self(DEFAULT_MAX_DURATION_MINUTES)
    }
}

impl FromStr for MaxDuration {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ModelError::InvalidMaxDuration(s.to_string()))
    }
}

impl fmt::Display for MaxDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}
