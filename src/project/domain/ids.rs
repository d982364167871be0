//! Identifier and validated scalar types for the project domain.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a project name, matching the `VARCHAR(120)` column.
const MAX_NAME_LENGTH: usize = 120;

/// Maximum length for a project description, matching the `VARCHAR(500)` column.
const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Maximum length for a display colour, matching the `VARCHAR(20)` column.
const MAX_COLOR_LENGTH: usize = 20;

/// Store-assigned identifier for a project record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(i64);

impl ProjectId {
    /// Wraps an identifier issued by the store.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the wrapped value.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated, trimmed, unique human-readable project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when the value is empty after
    /// trimming, or [`ProjectDomainError::NameTooLong`] when it exceeds 120
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ProjectDomainError::EmptyName);
        }
        if normalized.chars().count() > MAX_NAME_LENGTH {
            return Err(ProjectDomainError::NameTooLong {
                max: MAX_NAME_LENGTH,
            });
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional free-text project description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectDescription(String);

impl ProjectDescription {
    /// Creates a description, treating blank input as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::DescriptionTooLong`] when the trimmed
    /// value exceeds 500 characters.
    pub fn parse(value: Option<String>) -> Result<Option<Self>, ProjectDomainError> {
        bounded_optional(value, MAX_DESCRIPTION_LENGTH)
            .map_err(|max| ProjectDomainError::DescriptionTooLong { max })
            .map(|text| text.map(Self))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Optional display hint such as a hex code; carries no further semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectColor(String);

impl ProjectColor {
    /// Creates a colour hint, treating blank input as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ColorTooLong`] when the trimmed value
    /// exceeds 20 characters.
    pub fn parse(value: Option<String>) -> Result<Option<Self>, ProjectDomainError> {
        bounded_optional(value, MAX_COLOR_LENGTH)
            .map_err(|max| ProjectDomainError::ColorTooLong { max })
            .map(|text| text.map(Self))
    }

    /// Returns the colour as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trims optional text, mapping blank to `None` and rejecting over-long values.
fn bounded_optional(value: Option<String>, max: usize) -> Result<Option<String>, usize> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(max);
    }
    Ok(Some(trimmed.to_owned()))
}
