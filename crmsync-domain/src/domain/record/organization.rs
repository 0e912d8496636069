use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Custom organization fields as named in the ticketing platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationFields {
    pub account_owner: String,
    pub website: String,
    pub address: String,
    pub phone_number: String,
    pub package_type: String,
}

/// Destination-shaped customer company, keyed by `external_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub external_id: String,
    pub name: String,
    pub organization_fields: OrganizationFields,
}

impl Organization {
    /// Request body for the create-or-update endpoint.
    pub fn as_payload(&self) -> Value {
        json!({ "organization": self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let organization = Organization {
            external_id: "001A".to_owned(),
            name: "Acme".to_owned(),
            organization_fields: OrganizationFields {
                account_owner: "Jane Doe".to_owned(),
                website: "acme.test".to_owned(),
                address: "None\nNone, None None\nNone".to_owned(),
                phone_number: "555-0100".to_owned(),
                package_type: String::new(),
            },
        };

        assert_eq!(
            organization.as_payload(),
            json!({
                "organization": {
                    "external_id": "001A",
                    "name": "Acme",
                    "organization_fields": {
                        "account_owner": "Jane Doe",
                        "website": "acme.test",
                        "address": "None\nNone, None None\nNone",
                        "phone_number": "555-0100",
                        "package_type": ""
                    }
                }
            })
        );
    }
}
