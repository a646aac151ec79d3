use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_REGION, ModelError};

/// Regional partition of the control plane a reap pass operates in.
///
/// The value ends up as a `--region=<value>` argument, so it is validated on construction:
/// - non-empty;
/// - only lowercase ascii letters, digits and `-`;
/// - does not start with `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct Region(String);

impl Region {
    /// Create a validated region.
    ///
    /// # Examples
    /// ```
    /// use reap_model::Region;
    ///
    /// let region = Region::new("europe-west1").unwrap();
    /// assert_eq!(region.as_str(), "europe-west1");
    /// assert!(Region::new("--project=evil").is_err());
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, ModelError> {
        Self::try_from(s.into())
    }

    /// Returns the region name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Region {
    fn default() -> Self {
        Self(DEFAULT_REGION.to_string())
    }
}

impl TryFrom<String> for Region {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let valid = !s.is_empty()
            && !s.starts_with('-')
            && s
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
        if valid {
            Ok(Self(s))
        } else {
            Err(ModelError::InvalidRegion(s))
        }
    }
}

impl FromStr for Region {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.trim().to_owned())
    }
}

impl From<Region> for String {
    fn from(r: Region) -> Self {
        r.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
