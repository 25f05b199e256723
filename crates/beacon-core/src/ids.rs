//! Opaque string identifiers for every entity the engine touches.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Fresh random id (UUID v4).
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

define_id!(
    /// Identifies a configured HTTP monitor.
    MonitorId
);
define_id!(
    /// Identifies a status-page component.
    ComponentId
);
define_id!(
    /// Identifies an incident.
    IncidentId
);
define_id!(IncidentUpdateId);
define_id!(
    /// Identifies the project (status page) that owns monitors, components and incidents.
    ProjectId
);
define_id!(SubscriberId);

impl Default for ProjectId {
    fn default() -> Self {
        Self::new("default")
    }
}
