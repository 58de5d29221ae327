use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopicError {
    #[error("topic name cannot be empty")]
    EmptyName,
}

/// Validated topic key (trimmed, lower-cased, non-empty).
///
/// Lookups in the catalog and the studied-topics list both go through this
/// type, so `" Encapsulation "` and `"encapsulation"` name the same topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TopicName(String);

impl TopicName {
    /// Create a normalized topic name.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::EmptyName` if the name is empty after trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TopicError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TopicError::EmptyName);
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TopicName {
    type Err = TopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TopicName {
    type Error = TopicError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TopicName> for String {
    fn from(value: TopicName) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let name = TopicName::new("  Encapsulation ").unwrap();
        assert_eq!(name.as_str(), "encapsulation");
        assert_eq!(name, "ENCAPSULATION".parse().unwrap());
    }

    #[test]
    fn rejects_blank_names() {
        assert_eq!(TopicName::new("   ").unwrap_err(), TopicError::EmptyName);
    }
}
