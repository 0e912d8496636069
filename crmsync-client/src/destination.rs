use crate::{
    algebra::DestinationApi,
    response::{build_http_client, decode, read_body, rejected, transport_error},
    token::AccessToken,
};
use async_trait::async_trait;
use crmsync_domain::{ApplicationError, DestinationConfig, SyncError, TimedExt};
use http::Method;
use reqwest::Client;
use serde_json::Value;
use std::{collections::HashMap, time::Duration};
use tracing::debug;

/// Client for the Zendesk REST API using API-token basic authentication.
#[derive(Clone)]
pub struct ZendeskClient {
    config: DestinationConfig,
    http: Client,
}

impl ZendeskClient {
    pub fn new(config: DestinationConfig, timeout: Duration) -> Result<Self, SyncError> {
        Ok(Self {
            config,
            http: build_http_client(timeout)?,
        })
    }
}

#[async_trait]
impl DestinationApi for ZendeskClient {
    /// Credentials travel with every request, so there is nothing to exchange.
    async fn authenticate(&mut self) -> Result<AccessToken, SyncError> {
        Ok(AccessToken::Basic {
            username: self.config.api_user().unwrap_or_default(),
            password: self.config.token.clone().unwrap_or_default(),
        })
    }

    async fn query(
        &self,
        method: Method,
        path: &str,
        query_params: Option<&HashMap<String, String>>,
        body: Option<&Value>,
    ) -> Result<Value, SyncError> {
        let (Some(root), Some(user), Some(token)) = (
            self.config.api_root(),
            self.config.api_user(),
            self.config.token.as_deref().filter(|t| !t.trim().is_empty()),
        ) else {
            return Err(ApplicationError::authentication_failed(
                &format!(
                    "Missing Zendesk credentials: {}",
                    self.config.missing_credentials().join(", ")
                ),
                Some("missing_credentials"),
            ));
        };

        let url = format!("{root}{}", path.trim_start_matches('/'));

        let mut request = self
            .http
            .request(method.clone(), &url)
            .basic_auth(user, Some(token));
        if let Some(params) = query_params {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .timed(|_, elapsed| debug!("Zendesk {method} {url} took {elapsed:?}"))
            .await
            .map_err(|err| transport_error(err, &url))?;

        let (status, content) = read_body(response, &url).await?;

        if !(200..400).contains(&status.as_u16()) {
            return Err(rejected(status, &content, &url));
        }

        decode(&content, &url)
    }
}
