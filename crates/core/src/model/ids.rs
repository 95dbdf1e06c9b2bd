use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when an identifier is blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} must not be empty")]
pub struct IdError {
    kind: &'static str,
}

impl IdError {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

/// Accepts both `"c9"` and `9` on the wire; backends disagree on id encoding.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Text(text) => text,
            WireId::Number(number) => number.to_string(),
        }
    }
}

fn checked(kind: &'static str, raw: impl Into<String>) -> Result<String, IdError> {
    let raw = raw.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdError { kind });
    }
    if trimmed.len() == raw.len() {
        Ok(raw)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Backend-owned identifier of a card.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Creates a new `CardId`, rejecting blank values.
    ///
    /// # Errors
    ///
    /// Returns `IdError` if `raw` is empty or whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        checked("CardId", raw).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Backend-owned identifier of a deck.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DeckId(String);

impl DeckId {
    /// Creates a new `DeckId`, rejecting blank values.
    ///
    /// # Errors
    ///
    /// Returns `IdError` if `raw` is empty or whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        checked("DeckId", raw).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rank bucket inside a deck (e.g. `gold`). Opaque to the client.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankName(String);

impl RankName {
    /// Creates a new `RankName`, rejecting blank values.
    ///
    /// # Errors
    ///
    /// Returns `IdError` if `raw` is empty or whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        checked("RankName", raw).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = WireId::deserialize(deserializer)?.into_string();
        CardId::new(raw).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for DeckId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = WireId::deserialize(deserializer)?.into_string();
        DeckId::new(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({})", self.0)
    }
}

impl fmt::Debug for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeckId({})", self.0)
    }
}

impl fmt::Debug for RankName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RankName({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RankName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

impl FromStr for CardId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardId::new(s)
    }
}

impl FromStr for DeckId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeckId::new(s)
    }
}

impl FromStr for RankName {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RankName::new(s)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
