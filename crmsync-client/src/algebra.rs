use crate::token::AccessToken;
use async_trait::async_trait;
use crmsync_domain::SyncError;
use http::Method;
use serde_json::Value;
use std::collections::HashMap;

/// Read access to the CRM.
#[async_trait]
pub trait SourceApi: Send + Sync {
    /// Exchanges the configured credentials for a session.
    async fn authenticate(&mut self) -> Result<AccessToken, SyncError>;

    /// Reads `path` below the object API, posting `body` when one is given.
    /// Fails with `NotAuthenticated` before a successful [`Self::authenticate`].
    async fn fetch_object(&self, path: &str, body: Option<&Value>) -> Result<Value, SyncError>;
}

/// Read and write access to the ticketing platform.
#[async_trait]
pub trait DestinationApi: Send + Sync {
    async fn authenticate(&mut self) -> Result<AccessToken, SyncError>;

    async fn query(
        &self,
        method: Method,
        path: &str,
        query_params: Option<&HashMap<String, String>>,
        body: Option<&Value>,
    ) -> Result<Value, SyncError>;
}
