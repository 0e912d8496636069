use super::{account::Account, contact::Contact, window::ChangeWindow};
use serde::{Deserialize, Serialize};

/// Separator between package types of the same account.
pub const PACKAGE_TYPE_SEPARATOR: &str = "\n";

/// Everything pulled for one changed account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedAccount {
    pub account: Account,
    pub contacts: Vec<Contact>,
    /// Line-item names of every opportunity, flattened in fetch order.
    /// Empty when the account has no line items.
    pub package_type: String,
}

impl ExtractedAccount {
    pub fn new<I, S>(account: Account, contacts: Vec<Contact>, package_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let package_type = package_types
            .into_iter()
            .map(|p| p.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(PACKAGE_TYPE_SEPARATOR);

        Self {
            account,
            contacts,
            package_type,
        }
    }

    pub fn external_id(&self) -> &str {
        &self.account.id
    }
}

/// Immutable result of the extract stage, handed to the load stage as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub window: ChangeWindow,
    pub accounts: Vec<ExtractedAccount>,
}

impl Extraction {
    pub fn new(window: ChangeWindow, accounts: Vec<ExtractedAccount>) -> Self {
        Self { window, accounts }
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contact_count(&self) -> usize {
        self.accounts.iter().map(|a| a.contacts.len()).sum()
    }
}
