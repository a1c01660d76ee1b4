//! Assembly and file versions

use crate::error::{Result, RidkitError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dotted version with two to four numeric components
/// (`major.minor[.build[.revision]]`), as carried by assembly and file
/// version metadata in dependency manifests.
///
/// Missing trailing components are kept as `None` so that `"4.0"` prints
/// back as `"4.0"` rather than `"4.0.0.0"`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
    pub revision: Option<u32>,
}

impl Version {
    /// Create a full four-part version
    pub fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build: Some(build),
            revision: Some(revision),
        }
    }
}

impl FromStr for Version {
    type Err = RidkitError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || RidkitError::InvalidVersion(s.to_string());

        let parts = s
            .trim()
            .split('.')
            .map(|p| p.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<u32>>>()?;

        match parts.as_slice() {
            [major, minor] => Ok(Self {
                major: *major,
                minor: *minor,
                build: None,
                revision: None,
            }),
            [major, minor, build] => Ok(Self {
                major: *major,
                minor: *minor,
                build: Some(*build),
                revision: None,
            }),
            [major, minor, build, revision] => Ok(Self::new(*major, *minor, *build, *revision)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{}", build)?;
            if let Some(revision) = self.revision {
                write!(f, ".{}", revision)?;
            }
        }
        Ok(())
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl TryFrom<String> for Version {
    type Error = RidkitError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
