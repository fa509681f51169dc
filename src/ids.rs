//! Identifier types shared by the indexes and the task store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Numeric identifier of an artwork in the remote catalog.
///
/// The store key for an artwork is its canonical decimal form, so `"7"` is
/// an artwork key but `"007"` and `"+7"` are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtworkId(pub u64);

impl ArtworkId {
    /// Store key under which this artwork's task list lives.
    pub fn key(&self) -> String {
        self.0.to_string()
    }

    /// Parse a store key, accepting only the canonical decimal form.
    pub fn from_key(key: &str) -> Option<Self> {
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if key.len() > 1 && key.starts_with('0') {
            return None;
        }
        key.parse().ok().map(Self)
    }
}

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ArtworkId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s.trim()).ok_or_else(|| Error::InvalidArtworkId(s.to_string()))
    }
}

impl From<u64> for ArtworkId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Opaque task identifier, as handed out by the reminder service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that the ID can live in the comma-joined completed set.
    pub fn validate(&self) -> Result<(), Error> {
        if self.0.is_empty() {
            return Err(Error::InvalidArgument("task id cannot be empty".to_string()));
        }
        if self.0.contains(',') {
            return Err(Error::InvalidArgument(format!(
                "task id cannot contain ',': {}",
                self.0
            )));
        }
        Ok(())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaskId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Self(s.trim().to_string());
        id.validate()?;
        Ok(id)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
