//! Payment request identifier
//!
//! The record store owns id generation, so the id is an opaque string rather
//! than a UUID. The local JSON backend happens to mint UUID v4 strings; a
//! hosted backend may use anything.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier of a payment request, assigned by the record store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Wrap an identifier returned by a store
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random identifier (used by stores that generate ids locally)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for list views (first 8 characters)
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RequestId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdParseError::Empty);
        }
        if s.chars().any(|c| c.is_whitespace() || c == '/' || c == '?' || c == '&') {
            return Err(IdParseError::InvalidCharacter(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

/// Error returned when a user-supplied id cannot be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdParseError {
    Empty,
    InvalidCharacter(String),
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdParseError::Empty => write!(f, "request id cannot be empty"),
            IdParseError::InvalidCharacter(s) => write!(f, "invalid request id: {}", s),
        }
    }
}

impl std::error::Error for IdParseError {}
