use crmsync_domain::{ApplicationError, InternalError, SyncError};
use reqwest::{Response, StatusCode};
use serde_json::Value;

pub(crate) fn build_http_client(timeout: std::time::Duration) -> Result<reqwest::Client, SyncError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| {
            InternalError::connection_error(&format!("Failed to create client: {err}"), None)
        })
}

pub(crate) fn transport_error(err: reqwest::Error, url: &str) -> SyncError {
    if err.is_timeout() {
        InternalError::timeout(&format!("Request to {url} timed out: {err}"), None)
    } else {
        InternalError::connection_error(
            &format!("Failed to send request to {url}: {err}"),
            Some("reqwest::Error"),
        )
    }
}

pub(crate) async fn read_body(
    response: Response,
    url: &str,
) -> Result<(StatusCode, String), SyncError> {
    let status = response.status();
    let content = response
        .text()
        .await
        .map_err(|err| transport_error(err, url))?;

    Ok((status, content))
}

pub(crate) fn decode(content: &str, url: &str) -> Result<Value, SyncError> {
    if content.trim().is_empty() {
        return Err(ApplicationError::undecodable_response(
            &format!("Empty response body from {url}"),
            Some("empty"),
        ));
    }

    serde_json::from_str(content).map_err(|err| {
        ApplicationError::undecodable_response(
            &format!("Invalid JSON from {url}: {err}"),
            Some("invalid"),
        )
    })
}

pub(crate) fn rejected(status: StatusCode, content: &str, url: &str) -> SyncError {
    ApplicationError::request_failed(
        &format!("{url} responded with {status}: {content}"),
        Some(status.as_str()),
    )
}
