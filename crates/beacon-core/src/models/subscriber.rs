use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ProjectId, SubscriberId};

/// An email address that receives incident notices for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub project_id: ProjectId,
    pub email: String,
    pub verify_token: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}
