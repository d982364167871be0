//! Error types for project domain validation.

use thiserror::Error;

/// Errors returned while constructing project domain values.
///
/// Display strings double as per-field validation messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("must not be blank")]
    EmptyName,

    /// The project name exceeds the storage limit.
    #[error("size must be between 1 and {max}")]
    NameTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// The project description exceeds the storage limit.
    #[error("size must be between 0 and {max}")]
    DescriptionTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// The display colour exceeds the storage limit.
    #[error("size must be between 0 and {max}")]
    ColorTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },
}

impl ProjectDomainError {
    /// Returns the request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::DescriptionTooLong { .. } => "description",
            Self::ColorTooLong { .. } => "color",
        }
    }
}
