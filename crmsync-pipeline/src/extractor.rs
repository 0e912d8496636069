use crmsync_client::SourceApi;
use crmsync_domain::{
    Account, BillingAddress, ChangeWindow, Contact, ExtractedAccount, Extraction, JsonExt,
    SyncError, PLACEHOLDER,
};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Reads everything that changed inside a window, one account at a time.
pub struct Extractor<'a, S: SourceApi + ?Sized> {
    source: &'a S,
}

impl<'a, S: SourceApi + ?Sized> Extractor<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// A failure of the change discovery aborts. Below an account, a rejected
    /// or undecodable answer degrades to placeholders; transport failures abort.
    pub async fn extract(&self, window: ChangeWindow) -> Result<Extraction, SyncError> {
        let ids = self.changed_ids(&window).await?;
        info!("{} accounts changed in {window}", ids.len());

        let mut accounts = Vec::with_capacity(ids.len());
        for id in ids {
            accounts.push(self.extract_account(&id).await?);
        }

        Ok(Extraction::new(window, accounts))
    }

    pub async fn changed_ids(&self, window: &ChangeWindow) -> Result<Vec<String>, SyncError> {
        let path = format!(
            "Account/updated/?start={}&end={}",
            window.start_param(),
            window.end_param()
        );
        let response = self.source.fetch_object(&path, None).await?;

        let Some(ids) = response.get("ids").and_then(Value::as_array) else {
            info!("Change discovery returned no id list, nothing to sync");
            return Ok(Vec::new());
        };

        Ok(ids
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .collect())
    }

    pub async fn extract_account(&self, id: &str) -> Result<ExtractedAccount, SyncError> {
        debug!("Extracting account {id}");

        let owner = self.fetch_lenient(&format!("Account/{id}/Owner")).await?;
        let detail = self.fetch_lenient(&format!("Account/{id}")).await?;

        let account = Account {
            owner_name: owner.str_or("Name", PLACEHOLDER),
            ..account_from(id, &detail)
        };
        let contacts = self.contacts(id).await?;
        let package_types = self.package_types(id).await?;

        Ok(ExtractedAccount::new(account, contacts, package_types))
    }

    async fn contacts(&self, id: &str) -> Result<Vec<Contact>, SyncError> {
        let response = self.fetch_lenient(&format!("Account/{id}/Contacts")).await?;

        Ok(response
            .records()
            .iter()
            .map(|record| {
                Contact::new(
                    id,
                    record.str_field("Name").unwrap_or(PLACEHOLDER),
                    record.str_field("Email").unwrap_or(PLACEHOLDER),
                )
            })
            .collect())
    }

    /// Line-item names across all opportunities of the account, in fetch order.
    async fn package_types(&self, id: &str) -> Result<Vec<String>, SyncError> {
        let opportunities = self
            .fetch_lenient(&format!("Account/{id}/Opportunities"))
            .await?;

        let mut package_types = Vec::new();
        for opportunity in opportunities.records() {
            let Some(opportunity_id) = opportunity.str_field("Id") else {
                warn!("Skipping opportunity without id on account {id}");
                continue;
            };

            let line_items = self
                .fetch_lenient(&format!("Opportunity/{opportunity_id}/OpportunityLineItems"))
                .await?;

            package_types.extend(
                line_items
                    .records()
                    .iter()
                    .map(|item| item.str_or("Name", PLACEHOLDER)),
            );
        }

        Ok(package_types)
    }

    async fn fetch_lenient(&self, path: &str) -> Result<Value, SyncError> {
        match self.source.fetch_object(path, None).await {
            Ok(value) => Ok(value),
            Err(err) if err.is_response_error() => {
                warn!("Falling back to defaults for {path}: {err}");
                Ok(Value::Null)
            }
            Err(err) => Err(err),
        }
    }
}

fn account_from(id: &str, detail: &Value) -> Account {
    Account {
        id: id.to_owned(),
        owner_name: PLACEHOLDER.to_owned(),
        name: detail.str_or("Name", PLACEHOLDER),
        website: detail.str_or("Website", PLACEHOLDER),
        phone: detail.str_or("Phone", PLACEHOLDER),
        billing_address: BillingAddress {
            street: detail.str_or("BillingStreet", PLACEHOLDER),
            city: detail.str_or("BillingCity", PLACEHOLDER),
            state: detail.str_or("BillingState", PLACEHOLDER),
            postal_code: detail.str_or("BillingPostalCode", PLACEHOLDER),
            country: detail.str_or("BillingCountry", PLACEHOLDER),
        },
    }
}
