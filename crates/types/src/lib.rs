//! Validated text primitives shared across the AuraHealth crates.
//!
//! Patient fields that must never be blank (`name`, `city`) are stored as
//! [`NonEmptyText`], so the guarantee holds everywhere a record travels,
//! including through serde.

use serde::{Deserialize, Serialize};

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A trimmed string with at least one non-whitespace character.
///
/// Construction trims the input and rejects anything that trims to empty;
/// deserialization goes through the same check, so no blank value can sneak
/// in from a data file or request body.
///
/// The derived `Ord` compares the inner strings byte-wise, which is the
/// locale-independent ordering record listings are sorted by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a `NonEmptyText` from the given input, trimming leading and
    /// trailing whitespace.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the input is empty or contains only
    /// whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring test, used for free-text matching.
    pub fn contains_ignore_case(&self, term: &str) -> bool {
        self.0.to_lowercase().contains(&term.to_lowercase())
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyText> for String {
    fn from(text: NonEmptyText) -> Self {
        text.0
    }
}
