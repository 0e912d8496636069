use crate::{
    algebra::SourceApi,
    response::{build_http_client, decode, read_body, rejected, transport_error},
    token::AccessToken,
};
use async_trait::async_trait;
use crmsync_domain::{ApplicationError, InternalError, SourceConfig, SyncError, TimedExt};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    instance_url: String,
}

#[derive(Clone)]
struct Session {
    access_token: String,
    instance_url: String,
}

/// Client for the Salesforce REST API.
///
/// Holds the session obtained through the OAuth2 password grant; every
/// other call is refused until [`SourceApi::authenticate`] succeeded.
#[derive(Clone)]
pub struct SalesforceClient {
    config: SourceConfig,
    http: Client,
    session: Option<Session>,
}

impl SalesforceClient {
    pub fn new(config: SourceConfig, timeout: Duration) -> Result<Self, SyncError> {
        Ok(Self {
            config,
            http: build_http_client(timeout)?,
            session: None,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    fn session(&self) -> Result<&Session, SyncError> {
        self.session.as_ref().ok_or_else(|| {
            ApplicationError::not_authenticated(
                "Salesforce must be authenticated before it can be queried",
                None,
            )
        })
    }

    fn data_url(&self, session: &Session, suffix: &str) -> String {
        format!(
            "{}/services/data/{}/{}",
            session.instance_url,
            self.config.api_version,
            suffix.trim_start_matches('/')
        )
    }

    /// Runs a SOQL query through the query endpoint.
    pub async fn query(&self, soql: &str) -> Result<Value, SyncError> {
        if soql.trim().is_empty() {
            return Err(InternalError::invalid_argument(
                "SOQL query must not be empty",
                Some("soql"),
            ));
        }

        let session = self.session()?;
        let url = self.data_url(session, "query");
        let request = self
            .http
            .get(&url)
            .bearer_auth(&session.access_token)
            .query(&[("q", soql)]);

        self.send(request, &url).await
    }

    /// Lists the API versions the instance offers.
    pub async fn versions(&self) -> Result<Value, SyncError> {
        let session = self.session()?;
        let url = format!("{}/services/data", session.instance_url);
        let request = self.http.get(&url).bearer_auth(&session.access_token);

        self.send(request, &url).await
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<Value, SyncError> {
        let response = request
            .send()
            .timed(|_, elapsed| debug!("Salesforce request to {url} took {elapsed:?}"))
            .await
            .map_err(|err| transport_error(err, url))?;

        let (status, content) = read_body(response, url).await?;

        if !status.is_success() {
            return Err(rejected(status, &content, url));
        }

        decode(&content, url)
    }
}

#[async_trait]
impl SourceApi for SalesforceClient {
    async fn authenticate(&mut self) -> Result<AccessToken, SyncError> {
        let missing = self.config.missing_credentials();
        if !missing.is_empty() {
            return Err(ApplicationError::authentication_failed(
                &format!("Missing Salesforce credentials: {}", missing.join(", ")),
                Some("missing_credentials"),
            ));
        }

        let form = [
            ("grant_type", "password"),
            ("client_id", self.config.client_id.as_deref().unwrap_or_default()),
            (
                "client_secret",
                self.config.client_secret.as_deref().unwrap_or_default(),
            ),
            ("username", self.config.username.as_deref().unwrap_or_default()),
            ("password", self.config.password.as_deref().unwrap_or_default()),
        ];

        let url = self.config.login_url.as_str();
        let response = self
            .http
            .post(url)
            .form(&form)
            .send()
            .timed(|_, elapsed| debug!("Salesforce login took {elapsed:?}"))
            .await
            .map_err(|err| transport_error(err, url))?;

        let (status, content) = read_body(response, url).await?;

        if status != StatusCode::OK {
            return Err(ApplicationError::authentication_failed(
                &format!("Salesforce rejected the login with {status}: {content}"),
                Some(status.as_str()),
            ));
        }

        let token: TokenResponse = serde_json::from_str(&content).map_err(|err| {
            ApplicationError::authentication_failed(
                &format!("Salesforce login response could not be decoded: {err}"),
                Some("undecodable_token"),
            )
        })?;

        info!("Authenticated with Salesforce at {}", token.instance_url);

        self.session = Some(Session {
            access_token: token.access_token.clone(),
            instance_url: token.instance_url.trim_end_matches('/').to_owned(),
        });

        Ok(AccessToken::Bearer(token.access_token))
    }

    async fn fetch_object(&self, path: &str, body: Option<&Value>) -> Result<Value, SyncError> {
        let session = self.session()?;
        let url = self.data_url(session, &format!("sobjects/{}", path.trim_start_matches('/')));

        let request = match body {
            Some(body) => self.http.post(&url).json(body),
            None => self.http.get(&url),
        }
        .bearer_auth(&session.access_token);

        self.send(request, &url).await
    }
}
