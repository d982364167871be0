//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
///
/// Display strings double as per-field validation messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("must not be blank")]
    EmptyTitle,

    /// The task title exceeds the storage limit.
    #[error("size must be between 1 and {max}")]
    TitleTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// The task description exceeds the storage limit.
    #[error("size must be between 0 and {max}")]
    DescriptionTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },
}

impl TaskDomainError {
    /// Returns the request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::DescriptionTooLong { .. } => "description",
        }
    }
}

/// Error returned while parsing task statuses from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing a sort specification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseTaskSortError {
    /// The property is not sortable.
    #[error("unknown sort property: {0}")]
    UnknownField(String),

    /// The direction is neither `asc` nor `desc`.
    #[error("unknown sort direction: {0}")]
    UnknownDirection(String),
}
