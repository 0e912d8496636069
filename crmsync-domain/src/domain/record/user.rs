use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Destination-shaped end user. `external_id` is the owning account's id,
/// so every contact of an account shares it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub external_id: String,
    /// Ticketing-side id of the organization, resolved right before upsert.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub organization_id: Option<u64>,
}

impl User {
    pub fn with_organization(mut self, organization_id: Option<u64>) -> Self {
        self.organization_id = organization_id;
        self
    }

    /// Request body for the create-or-update endpoint.
    pub fn as_payload(&self) -> Value {
        json!({ "user": self })
    }
}
