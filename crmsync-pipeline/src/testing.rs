use async_trait::async_trait;
use crmsync_client::{AccessToken, DestinationApi, SourceApi};
use crmsync_domain::{ApplicationError, ChangeWindow, SyncError};
use fake::{
    faker::{internet::en::SafeEmail, name::en::Name},
    Fake,
};
use http::Method;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory CRM keyed by object path. Unknown paths answer 404.
#[derive(Default)]
pub struct FakeSource {
    objects: HashMap<String, Result<Value, SyncError>>,
    auth_error: Option<SyncError>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, path: &str, value: Value) -> Self {
        self.objects.insert(path.to_owned(), Ok(value));
        self
    }

    pub fn with_error(mut self, path: &str, error: SyncError) -> Self {
        self.objects.insert(path.to_owned(), Err(error));
        self
    }

    pub fn with_auth_error(mut self, error: SyncError) -> Self {
        self.auth_error = Some(error);
        self
    }

    pub fn with_changes(self, window: &ChangeWindow, value: Value) -> Self {
        let path = format!(
            "Account/updated/?start={}&end={}",
            window.start_param(),
            window.end_param()
        );
        self.with_object(&path, value)
    }

    pub fn with_account(self, id: &str, detail: Value) -> Self {
        self.with_object(&format!("Account/{id}"), detail)
    }

    pub fn with_contacts(self, id: &str, contacts: &[(&str, &str)]) -> Self {
        let records = contacts
            .iter()
            .map(|(name, email)| json!({ "Name": name, "Email": email }))
            .collect::<Vec<_>>();

        self.with_object(
            &format!("Account/{id}/Contacts"),
            json!({ "totalSize": records.len(), "records": records }),
        )
    }

    pub fn with_fake_contacts(self, id: &str, count: usize) -> Self {
        let contacts = (0..count)
            .map(|_| (Name().fake::<String>(), SafeEmail().fake::<String>()))
            .collect::<Vec<_>>();
        let borrowed = contacts
            .iter()
            .map(|(name, email)| (name.as_str(), email.as_str()))
            .collect::<Vec<_>>();

        self.with_contacts(id, &borrowed)
    }

    /// One opportunity per entry, each owning the given line-item names.
    pub fn with_line_items(self, id: &str, opportunities: &[&[&str]]) -> Self {
        let records = (0..opportunities.len())
            .map(|n| json!({ "Id": format!("{id}-OPP{n}") }))
            .collect::<Vec<_>>();

        opportunities.iter().enumerate().fold(
            self.with_object(
                &format!("Account/{id}/Opportunities"),
                json!({ "records": records }),
            ),
            |source, (n, items)| {
                let records = items
                    .iter()
                    .map(|name| json!({ "Name": name }))
                    .collect::<Vec<_>>();

                source.with_object(
                    &format!("Opportunity/{id}-OPP{n}/OpportunityLineItems"),
                    json!({ "records": records }),
                )
            },
        )
    }

    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl SourceApi for FakeSource {
    async fn authenticate(&mut self) -> Result<AccessToken, SyncError> {
        match &self.auth_error {
            Some(error) => Err(error.clone()),
            None => Ok(AccessToken::Bearer("fake-session".to_owned())),
        }
    }

    async fn fetch_object(&self, path: &str, _body: Option<&Value>) -> Result<Value, SyncError> {
        lock(&self.calls).push(path.to_owned());

        self.objects.get(path).cloned().unwrap_or_else(|| {
            Err(ApplicationError::request_failed(
                &format!("{path} not found"),
                Some("404"),
            ))
        })
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub params: Option<HashMap<String, String>>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Ledger {
    requests: Vec<Request>,
    organizations: HashMap<String, u64>,
    next_id: u64,
}

/// Ticketing platform double that keeps organizations by external id and
/// records every request in order.
#[derive(Default)]
pub struct FakeDestination {
    ledger: Mutex<Ledger>,
    unsearchable: bool,
    failing_path: Option<String>,
}

impl FakeDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Organization search never finds anything, as while an index lags.
    pub fn unsearchable(mut self) -> Self {
        self.unsearchable = true;
        self
    }

    pub fn failing_on(mut self, path: &str) -> Self {
        self.failing_path = Some(path.to_owned());
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        lock(&self.ledger).requests.clone()
    }

    pub fn bodies(&self, path: &str) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .filter_map(|r| r.body)
            .collect()
    }
}

#[async_trait]
impl DestinationApi for FakeDestination {
    async fn authenticate(&mut self) -> Result<AccessToken, SyncError> {
        Ok(AccessToken::Basic {
            username: "agent@acme.test/token".to_owned(),
            password: "fake-token".to_owned(),
        })
    }

    async fn query(
        &self,
        method: Method,
        path: &str,
        query_params: Option<&HashMap<String, String>>,
        body: Option<&Value>,
    ) -> Result<Value, SyncError> {
        let mut ledger = lock(&self.ledger);
        ledger.requests.push(Request {
            method: method.clone(),
            path: path.to_owned(),
            params: query_params.cloned(),
            body: body.cloned(),
        });

        if self.failing_path.as_deref() == Some(path) {
            return Err(ApplicationError::request_failed(
                &format!("{path} is unavailable"),
                Some("500"),
            ));
        }

        ledger.next_id += 1;
        let next_id = ledger.next_id;

        match (method, path) {
            (Method::POST, "organizations/create_or_update.json") => {
                let external_id = body
                    .and_then(|b| b["organization"]["external_id"].as_str())
                    .unwrap_or_default()
                    .to_owned();
                let id = *ledger.organizations.entry(external_id).or_insert(next_id);

                Ok(json!({ "organization": { "id": id } }))
            }
            (Method::GET, "organizations/search.json") => {
                let found = query_params
                    .and_then(|p| p.get("external_id"))
                    .and_then(|external_id| ledger.organizations.get(external_id))
                    .filter(|_| !self.unsearchable)
                    .map(|id| vec![json!({ "id": id })])
                    .unwrap_or_default();

                Ok(json!({ "count": found.len(), "organizations": found }))
            }
            (Method::POST, "users/create_or_update.json") => {
                Ok(json!({ "user": { "id": next_id } }))
            }
            (method, path) => Err(ApplicationError::request_failed(
                &format!("{method} {path} is not routed"),
                Some("404"),
            )),
        }
    }
}
