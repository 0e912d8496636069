use crmsync_client::DestinationApi;
use crmsync_domain::{
    ExtractedAccount, Extraction, Organization, OrganizationFields, RecordOutcome, SyncError,
    User,
};
use http::Method;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub const ORGANIZATION_UPSERT_PATH: &str = "organizations/create_or_update.json";
pub const ORGANIZATION_SEARCH_PATH: &str = "organizations/search.json";
pub const USER_UPSERT_PATH: &str = "users/create_or_update.json";

/// Every custom field is always sent; absent source data already carries its
/// placeholder.
pub fn map_organization(extracted: &ExtractedAccount) -> Organization {
    let account = &extracted.account;

    Organization {
        external_id: account.id.clone(),
        name: account.name.clone(),
        organization_fields: OrganizationFields {
            account_owner: account.owner_name.clone(),
            website: account.website.clone(),
            address: account.billing_address.formatted(),
            phone_number: account.phone.clone(),
            package_type: extracted.package_type.clone(),
        },
    }
}

/// One user per contact, all sharing the account id as `external_id`.
/// Organization links are resolved at load time.
pub fn map_users(extracted: &ExtractedAccount) -> Vec<User> {
    extracted
        .contacts
        .iter()
        .map(|contact| User {
            name: contact.name.clone(),
            email: contact.email.clone(),
            external_id: contact.account_id.clone(),
            organization_id: None,
        })
        .collect()
}

/// Writes an extraction into the ticketing platform by external-id upsert.
pub struct Reconciler<'a, D: DestinationApi + ?Sized> {
    destination: &'a D,
}

impl<'a, D: DestinationApi + ?Sized> Reconciler<'a, D> {
    pub fn new(destination: &'a D) -> Self {
        Self { destination }
    }

    /// Upserts all organizations, then all users. Stops at the first failed
    /// write; `outcomes` keeps every write acknowledged before that.
    pub async fn load(
        &self,
        extraction: &Extraction,
        outcomes: &mut Vec<RecordOutcome>,
    ) -> Result<(), SyncError> {
        for extracted in &extraction.accounts {
            let organization = map_organization(extracted);
            let id = self.upsert_organization(&organization).await?;
            outcomes.push(RecordOutcome::organization(&organization.external_id, id));
        }
        info!("Upserted {} organizations", extraction.accounts.len());

        for extracted in &extraction.accounts {
            for user in map_users(extracted) {
                let organization_id = self.find_organization(&user.external_id).await?;
                if organization_id.is_none() {
                    warn!(
                        "No organization found for {}, upserting user unlinked",
                        user.external_id
                    );
                }

                let user = user.with_organization(organization_id);
                let id = self.upsert_user(&user).await?;
                outcomes.push(RecordOutcome::user(&user.external_id, id, organization_id));
            }
        }
        info!("Upserted {} users", extraction.contact_count());

        Ok(())
    }

    pub async fn upsert_organization(
        &self,
        organization: &Organization,
    ) -> Result<Option<u64>, SyncError> {
        let response = self
            .destination
            .query(
                Method::POST,
                ORGANIZATION_UPSERT_PATH,
                None,
                Some(&organization.as_payload()),
            )
            .await?;

        let id = response["organization"]["id"].as_u64();
        debug!("Organization {} upserted as {id:?}", organization.external_id);
        Ok(id)
    }

    /// Ticketing-side id of the organization carrying `external_id`, if any.
    pub async fn find_organization(&self, external_id: &str) -> Result<Option<u64>, SyncError> {
        let params = HashMap::from([("external_id".to_owned(), external_id.to_owned())]);
        let response = self
            .destination
            .query(Method::GET, ORGANIZATION_SEARCH_PATH, Some(&params), None)
            .await?;

        Ok(response
            .get("organizations")
            .and_then(Value::as_array)
            .and_then(|organizations| organizations.first())
            .and_then(|organization| organization["id"].as_u64()))
    }

    pub async fn upsert_user(&self, user: &User) -> Result<Option<u64>, SyncError> {
        let response = self
            .destination
            .query(Method::POST, USER_UPSERT_PATH, None, Some(&user.as_payload()))
            .await?;

        Ok(response["user"]["id"].as_u64())
    }
}
