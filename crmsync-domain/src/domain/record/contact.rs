use serde::{Deserialize, Serialize};

/// A person attached to an account. An account may own any number of them;
/// each carries the owning account id explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub account_id: String,
    pub name: String,
    pub email: String,
}

impl Contact {
    pub fn new(account_id: &str, name: &str, email: &str) -> Self {
        Self {
            account_id: account_id.to_owned(),
            name: name.to_owned(),
            email: email.to_owned(),
        }
    }
}
