use serde::{Deserialize, Serialize};

/// Stand-in for any source field that was absent, blank or unreadable.
pub const PLACEHOLDER: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Default for BillingAddress {
    fn default() -> Self {
        Self {
            street: PLACEHOLDER.to_owned(),
            city: PLACEHOLDER.to_owned(),
            state: PLACEHOLDER.to_owned(),
            postal_code: PLACEHOLDER.to_owned(),
            country: PLACEHOLDER.to_owned(),
        }
    }
}

impl BillingAddress {
    /// Mailing-label rendering: street, then `city, state postal`, then country.
    pub fn formatted(&self) -> String {
        format!(
            "{}\n{}, {} {}\n{}",
            self.street, self.city, self.state, self.postal_code, self.country
        )
    }
}

/// Snapshot of a changed CRM account, taken once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub owner_name: String,
    pub name: String,
    pub website: String,
    pub phone: String,
    pub billing_address: BillingAddress,
}

impl Account {
    /// An account whose every field still holds the placeholder.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            owner_name: PLACEHOLDER.to_owned(),
            name: PLACEHOLDER.to_owned(),
            website: PLACEHOLDER.to_owned(),
            phone: PLACEHOLDER.to_owned(),
            billing_address: BillingAddress::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_is_fully_defaulted() {
        let account = Account::new("001A");

        assert_eq!(account.id, "001A");
        assert_eq!(account.owner_name, PLACEHOLDER);
        assert_eq!(account.name, PLACEHOLDER);
        assert_eq!(account.website, PLACEHOLDER);
        assert_eq!(account.phone, PLACEHOLDER);
        assert_eq!(account.billing_address, BillingAddress::default());
    }

    #[test]
    fn test_formatted_address() {
        let address = BillingAddress {
            street: "1 Main St".to_owned(),
            city: "Springfield".to_owned(),
            state: "IL".to_owned(),
            postal_code: "62701".to_owned(),
            country: "USA".to_owned(),
        };

        assert_eq!(address.formatted(), "1 Main St\nSpringfield, IL 62701\nUSA");
    }
}
