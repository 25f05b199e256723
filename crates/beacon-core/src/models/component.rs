use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ComponentId, ProjectId};

/// Public status of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    #[default]
    Operational,
    Degraded,
    Down,
    Maintenance,
}

impl ComponentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Degraded => "degraded",
            Self::Down => "down",
            Self::Maintenance => "maintenance",
        }
    }

    /// Rank used to fold many statuses into one: down > degraded > maintenance > operational.
    pub fn severity(&self) -> u8 {
        match self {
            Self::Operational => 0,
            Self::Maintenance => 1,
            Self::Degraded => 2,
            Self::Down => 3,
        }
    }

    /// Most severe status of the set; operational when empty.
    pub fn worst<I: IntoIterator<Item = ComponentStatus>>(statuses: I) -> ComponentStatus {
        statuses
            .into_iter()
            .max_by_key(ComponentStatus::severity)
            .unwrap_or(ComponentStatus::Operational)
    }
}

/// A user-facing service unit shown on the status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub project_id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub status: ComponentStatus,
    /// Display position on the status page, ascending.
    pub order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Operator-supplied component definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Optional fixed id, generated when absent.
    #[serde(default)]
    pub id: Option<ComponentId>,
    #[serde(default)]
    pub project_id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ComponentStatus,
}

impl ComponentSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            project_id: ProjectId::default(),
            name: name.into(),
            description: None,
            status: ComponentStatus::Operational,
        }
    }
}

/// Partial edit of a component. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ComponentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worst_status_ordering() {
        use ComponentStatus::*;
        assert_eq!(ComponentStatus::worst([]), Operational);
        assert_eq!(ComponentStatus::worst([Operational, Maintenance]), Maintenance);
        assert_eq!(ComponentStatus::worst([Maintenance, Degraded]), Degraded);
        assert_eq!(ComponentStatus::worst([Degraded, Down, Operational]), Down);
    }
}
