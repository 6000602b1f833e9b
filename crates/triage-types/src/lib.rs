//! # Triage Types
//!
//! Validated primitive types shared by the triage crates.
//!
//! Each type checks its invariant once, at construction or deserialisation, so downstream code
//! can rely on it without re-validating.

/// Rejection for free text that carries no content.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    #[error("text cannot be empty")]
    Empty,
}

/// Free text with at least one non-whitespace character, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// # Errors
    ///
    /// `TextError::Empty` if nothing is left after trimming.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        match input.as_ref().trim() {
            "" => Err(TextError::Empty),
            text => Ok(Self(text.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
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

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that can occur when creating an [`Age`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AgeError {
    #[error("age must be between {min} and {max} years, got {0}", min = Age::MIN, max = Age::MAX)]
    OutOfRange(i64),
}

/// Age in completed years, bounded to `0..=120`.
///
/// Zero is a valid age and denotes an infant under one year old.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct Age(u8);

impl Age {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 120;

    /// Creates a new `Age`, rejecting values outside `0..=120`.
    pub fn new(years: i64) -> Result<Self, AgeError> {
        if years < i64::from(Self::MIN) || years > i64::from(Self::MAX) {
            return Err(AgeError::OutOfRange(years));
        }
        Ok(Self(years as u8))
    }

    pub fn years(self) -> u8 {
        self.0
    }

    /// True when the age is under one completed year.
    pub fn is_infant(self) -> bool {
        self.0 < 1
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Age {
    type Error = AgeError;

    fn try_from(years: i64) -> Result<Self, Self::Error> {
        Self::new(years)
    }
}

impl From<Age> for u8 {
    fn from(age: Age) -> Self {
        age.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  mild headache \n").expect("valid text");
        assert_eq!(text.as_str(), "mild headache");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new("   \t").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn non_empty_text_deserialise_rejects_blank() {
        let err = serde_json::from_str::<NonEmptyText>("\"  \"").expect_err("should reject");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn age_accepts_bounds() {
        assert_eq!(Age::new(0).expect("zero").years(), 0);
        assert_eq!(Age::new(120).expect("max").years(), 120);
    }

    #[test]
    fn age_rejects_out_of_range() {
        assert_eq!(Age::new(-1).unwrap_err(), AgeError::OutOfRange(-1));
        assert_eq!(Age::new(121).unwrap_err(), AgeError::OutOfRange(121));
    }

    #[test]
    fn infant_is_under_one_year() {
        assert!(Age::new(0).expect("zero").is_infant());
        assert!(!Age::new(1).expect("one").is_infant());
    }

    #[test]
    fn age_deserialise_validates_range() {
        let age: Age = serde_json::from_str("42").expect("valid age");
        assert_eq!(age.years(), 42);

        let err = serde_json::from_str::<Age>("130").expect_err("should reject");
        assert!(err.to_string().contains("between 0 and 120"));
    }
}
