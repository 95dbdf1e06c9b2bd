use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned for an unknown study mode value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown study mode: {0}")]
pub struct ModeError(pub String);

/// Study cadence for a learning session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudyMode {
    /// Short-cycle focused study.
    #[default]
    ThreeDay,
    /// Long-term review.
    Permanent,
}

impl StudyMode {
    pub const ALL: [StudyMode; 2] = [StudyMode::ThreeDay, StudyMode::Permanent];

    /// Wire name used in query strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StudyMode::ThreeDay => "THREE_DAY",
            StudyMode::Permanent => "PERMANENT",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StudyMode::ThreeDay => "3 Day Project",
            StudyMode::Permanent => "Permanent Project",
        }
    }

    /// Parses an optional query value, treating absent or blank as `ThreeDay`.
    ///
    /// # Errors
    ///
    /// Returns `ModeError` for values other than the two wire names.
    pub fn from_query(raw: Option<&str>) -> Result<Self, ModeError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(StudyMode::default()),
            Some(value) => value.parse(),
        }
    }
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "THREE_DAY" => Ok(StudyMode::ThreeDay),
            "PERMANENT" => Ok(StudyMode::Permanent),
            other => Err(ModeError(other.to_string())),
        }
    }
}
