//! Response shape exposed to API clients for projects.

use crate::project::domain::Project;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project as rendered at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    /// Store-assigned identifier.
    pub id: i64,
    /// Unique project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional display colour.
    pub color: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().into_inner(),
            name: project.name().as_str().to_owned(),
            description: project.description().map(|text| text.as_str().to_owned()),
            color: project.color().map(|text| text.as_str().to_owned()),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}
