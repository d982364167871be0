//! Project aggregate root.

use super::{ProjectColor, ProjectDescription, ProjectId, ProjectName};
use crate::validation::{FieldViolations, check};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated mutable project fields.
///
/// Used both for creation and for full-replace updates, where every field is
/// overwritten with the supplied value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    /// Unique project name.
    pub name: ProjectName,
    /// Optional description.
    pub description: Option<ProjectDescription>,
    /// Optional display colour.
    pub color: Option<ProjectColor>,
}

impl ProjectDetails {
    /// Validates raw field values, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns [`FieldViolations`] naming each invalid field.
    pub fn parse(
        name: String,
        description: Option<String>,
        color: Option<String>,
    ) -> Result<Self, FieldViolations> {
        let mut violations = FieldViolations::new();
        let parsed_name = check(&mut violations, "name", ProjectName::new(name));
        let parsed_description = check(
            &mut violations,
            "description",
            ProjectDescription::parse(description),
        );
        let parsed_color = check(&mut violations, "color", ProjectColor::parse(color));

        match (parsed_name, parsed_description, parsed_color) {
            (Some(project_name), Some(project_description), Some(project_color)) => Ok(Self {
                name: project_name,
                description: project_description,
                color: project_color,
            }),
            _ => Err(violations),
        }
    }
}

/// Project that has not yet been assigned an identifier by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    details: ProjectDetails,
    created_at: DateTime<Utc>,
}

impl NewProject {
    /// Creates a project draft stamped with the current clock time.
    #[must_use]
    pub fn new(details: ProjectDetails, clock: &impl Clock) -> Self {
        Self {
            details,
            created_at: clock.utc(),
        }
    }

    /// Returns the validated project fields.
    #[must_use]
    pub const fn details(&self) -> &ProjectDetails {
        &self.details
    }

    /// Returns the creation timestamp, also used as the first update time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Materialises the draft with a store-issued identifier.
    #[must_use]
    pub fn assign_id(self, id: ProjectId) -> Project {
        Project {
            id,
            name: self.details.name,
            description: self.details.description,
            color: self.details.color,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: Option<ProjectDescription>,
    color: Option<ProjectColor>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: ProjectName,
    /// Persisted description.
    pub description: Option<ProjectDescription>,
    /// Persisted colour hint.
    pub color: Option<ProjectColor>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            color: data.color,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the project description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&ProjectDescription> {
        self.description.as_ref()
    }

    /// Returns the display colour, if any.
    #[must_use]
    pub const fn color(&self) -> Option<&ProjectColor> {
        self.color.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrites every mutable field and refreshes `updated_at`.
    pub fn replace_details(&mut self, details: ProjectDetails, clock: &impl Clock) {
        self.name = details.name;
        self.description = details.description;
        self.color = details.color;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp, never moving it before `created_at`.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc().max(self.created_at);
    }
}
