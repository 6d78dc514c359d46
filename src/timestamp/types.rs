//! Timestamp types shared by the local and remote sides of a reconciliation.

use std::fmt;
use thiserror::Error;

/// Error types for timestamp normalization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Malformed timestamp: {0:?}")]
    Malformed(String),
}

/// The source a raw timestamp came from, which fixes its format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// Embedded file metadata: `YYYY:MM:DD HH:MM:SS`.
    LocalMetadata,
    /// Remote album listing: `YYYY-MM-DD HH:MM:SS`.
    Remote,
}

/// A timestamp exactly as it was read from its source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawTimestamp(String);

impl RawTimestamp {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawTimestamp {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RawTimestamp {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RawTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized `YYYY-MM-DD HH:MM:SS` form.
///
/// Two timestamps match iff their canonical strings are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalTimestamp(String);

impl CanonicalTimestamp {
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_timestamp_display() {
        let raw = RawTimestamp::from("2019:06:19 15:02:27");
        assert_eq!(raw.to_string(), "2019:06:19 15:02:27");
        assert_eq!(raw.as_str(), "2019:06:19 15:02:27");
    }

    #[test]
    fn test_malformed_error_message_quotes_input() {
        let err = TimestampError::Malformed("garbage".to_string());
        assert_eq!(err.to_string(), "Malformed timestamp: \"garbage\"");
    }
}
