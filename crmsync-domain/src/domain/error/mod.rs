use crate::prelude::StringExt;
use serde::Serialize;
use std::{
    error::Error as StdError,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
};
use strum::AsRefStr;
use thiserror::Error as ThisError;

pub trait ErrorMeta {
    fn code(&self) -> ErrorCode;
    fn key(&self) -> ErrorKey;
    fn message(&self) -> ErrorMessage;
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct ErrorKey(String);

impl ErrorKey {
    pub fn internal(key: &str, subtype: Option<&str>) -> Self {
        match subtype {
            Some(subtype) => ErrorKey(format!("err::internal::{key}::{subtype}")),
            None => ErrorKey(format!("err::internal::{key}")),
        }
    }

    pub fn application(key: &str, subtype: Option<&str>) -> Self {
        match subtype {
            Some(subtype) => ErrorKey(format!("err::application::{key}::{subtype}")),
            None => ErrorKey(format!("err::application::{key}")),
        }
    }
}

impl Display for ErrorKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct ErrorMessage(String);

impl AsRef<str> for ErrorMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

fn normalize(subtype: Option<&str>) -> Option<String> {
    subtype.map(|s| s.snake_case())
}

fn write_chain(error: &dyn StdError, f: &mut Formatter<'_>) -> FmtResult {
    writeln!(f, "{}\n", error)?;
    let mut current = error.source();

    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }

    Ok(())
}

/// Failures that originate in this process or its transport rather than in
/// a platform's answer.
#[derive(ThisError, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "PascalCase")]
pub enum InternalError {
    #[error("A timeout occurred: {}", .message)]
    Timeout {
        message: String,
        subtype: Option<String>,
    },
    #[error("A connection error occurred: {}", .message)]
    ConnectionError {
        message: String,
        subtype: Option<String>,
    },
    #[error("Argument provided is invalid: {}", .message)]
    InvalidArgument {
        message: String,
        subtype: Option<String>,
    },
    #[error("Configuration error: {}", .message)]
    ConfigurationError {
        message: String,
        subtype: Option<String>,
    },
}

impl InternalError {
    pub fn timeout(message: &str, subtype: Option<&str>) -> SyncError {
        SyncError::internal(InternalError::Timeout {
            message: message.to_string(),
            subtype: normalize(subtype),
        })
    }

    pub fn connection_error(message: &str, subtype: Option<&str>) -> SyncError {
        SyncError::internal(InternalError::ConnectionError {
            message: message.to_string(),
            subtype: normalize(subtype),
        })
    }

    pub fn invalid_argument(message: &str, subtype: Option<&str>) -> SyncError {
        SyncError::internal(InternalError::InvalidArgument {
            message: message.to_string(),
            subtype: normalize(subtype),
        })
    }

    pub fn configuration_error(message: &str, subtype: Option<&str>) -> SyncError {
        SyncError::internal(InternalError::ConfigurationError {
            message: message.to_string(),
            subtype: normalize(subtype),
        })
    }
}

impl ErrorMeta for InternalError {
    fn code(&self) -> ErrorCode {
        match self {
            InternalError::Timeout { .. } => ErrorCode(1000),
            InternalError::ConnectionError { .. } => ErrorCode(1001),
            InternalError::InvalidArgument { .. } => ErrorCode(1002),
            InternalError::ConfigurationError { .. } => ErrorCode(1003),
        }
    }

    fn key(&self) -> ErrorKey {
        match self {
            InternalError::Timeout { subtype, .. } => {
                ErrorKey::internal("timeout", subtype.as_deref())
            }
            InternalError::ConnectionError { subtype, .. } => {
                ErrorKey::internal("connection_error", subtype.as_deref())
            }
            InternalError::InvalidArgument { subtype, .. } => {
                ErrorKey::internal("invalid_argument", subtype.as_deref())
            }
            InternalError::ConfigurationError { subtype, .. } => {
                ErrorKey::internal("configuration_error", subtype.as_deref())
            }
        }
    }

    fn message(&self) -> ErrorMessage {
        match self {
            InternalError::Timeout { message, .. }
            | InternalError::ConnectionError { message, .. }
            | InternalError::InvalidArgument { message, .. }
            | InternalError::ConfigurationError { message, .. } => {
                ErrorMessage(message.to_string())
            }
        }
    }
}

impl Debug for InternalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write_chain(self, f)
    }
}

/// Failures reported by, or about, one of the two platforms.
///
/// `AuthenticationFailed` is the login failure, `RequestFailed` and
/// `UndecodableResponse` together make up a failed query, and
/// `NotAuthenticated` is a call issued before a session exists.
#[derive(ThisError, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "PascalCase")]
pub enum ApplicationError {
    #[error("Authentication failed: {}", .message)]
    AuthenticationFailed {
        message: String,
        subtype: Option<String>,
    },
    #[error("Request failed: {}", .message)]
    RequestFailed {
        message: String,
        subtype: Option<String>,
    },
    #[error("Response could not be decoded: {}", .message)]
    UndecodableResponse {
        message: String,
        subtype: Option<String>,
    },
    #[error("Not authenticated: {}", .message)]
    NotAuthenticated {
        message: String,
        subtype: Option<String>,
    },
}

impl ApplicationError {
    pub fn authentication_failed(message: &str, subtype: Option<&str>) -> SyncError {
        SyncError::application(ApplicationError::AuthenticationFailed {
            message: message.to_string(),
            subtype: normalize(subtype),
        })
    }

    pub fn request_failed(message: &str, subtype: Option<&str>) -> SyncError {
        SyncError::application(ApplicationError::RequestFailed {
            message: message.to_string(),
            subtype: normalize(subtype),
        })
    }

    pub fn undecodable_response(message: &str, subtype: Option<&str>) -> SyncError {
        SyncError::application(ApplicationError::UndecodableResponse {
            message: message.to_string(),
            subtype: normalize(subtype),
        })
    }

    pub fn not_authenticated(message: &str, subtype: Option<&str>) -> SyncError {
        SyncError::application(ApplicationError::NotAuthenticated {
            message: message.to_string(),
            subtype: normalize(subtype),
        })
    }
}

impl ErrorMeta for ApplicationError {
    fn code(&self) -> ErrorCode {
        match self {
            ApplicationError::AuthenticationFailed { .. } => ErrorCode(2000),
            ApplicationError::RequestFailed { .. } => ErrorCode(2001),
            ApplicationError::UndecodableResponse { .. } => ErrorCode(2002),
            ApplicationError::NotAuthenticated { .. } => ErrorCode(2003),
        }
    }

    fn key(&self) -> ErrorKey {
        match self {
            ApplicationError::AuthenticationFailed { subtype, .. } => {
                ErrorKey::application("authentication_failed", subtype.as_deref())
            }
            ApplicationError::RequestFailed { subtype, .. } => {
                ErrorKey::application("request_failed", subtype.as_deref())
            }
            ApplicationError::UndecodableResponse { subtype, .. } => {
                ErrorKey::application("undecodable_response", subtype.as_deref())
            }
            ApplicationError::NotAuthenticated { subtype, .. } => {
                ErrorKey::application("not_authenticated", subtype.as_deref())
            }
        }
    }

    fn message(&self) -> ErrorMessage {
        match self {
            ApplicationError::AuthenticationFailed { message, .. }
            | ApplicationError::RequestFailed { message, .. }
            | ApplicationError::UndecodableResponse { message, .. }
            | ApplicationError::NotAuthenticated { message, .. } => {
                ErrorMessage(message.to_string())
            }
        }
    }
}

impl Debug for ApplicationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write_chain(self, f)
    }
}

#[derive(ThisError, Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(untagged)]
pub enum SyncError {
    Internal(InternalError),
    Application(ApplicationError),
}

impl AsRef<str> for SyncError {
    fn as_ref(&self) -> &str {
        match self {
            SyncError::Internal(e) => e.as_ref(),
            SyncError::Application(e) => e.as_ref(),
        }
    }
}

impl SyncError {
    fn internal(internal: InternalError) -> Self {
        SyncError::Internal(internal)
    }

    fn application(application: ApplicationError) -> Self {
        SyncError::Application(application)
    }

    /// Login rejected or impossible.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            SyncError::Application(ApplicationError::AuthenticationFailed { .. })
        )
    }

    /// A request that was issued but did not produce usable JSON, including
    /// transport failures on the way there.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            SyncError::Application(
                ApplicationError::RequestFailed { .. }
                    | ApplicationError::UndecodableResponse { .. }
            ) | SyncError::Internal(
                InternalError::Timeout { .. } | InternalError::ConnectionError { .. }
            )
        )
    }

    pub fn is_not_authenticated(&self) -> bool {
        matches!(
            self,
            SyncError::Application(ApplicationError::NotAuthenticated { .. })
        )
    }

    /// HTTP status carried by a rejected login or request, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Application(
                ApplicationError::AuthenticationFailed { subtype, .. }
                | ApplicationError::RequestFailed { subtype, .. },
            ) => subtype.as_deref().and_then(|s| s.parse().ok()),
            _ => None,
        }
    }

    /// The platform answered, but not with usable JSON.
    pub fn is_response_error(&self) -> bool {
        matches!(
            self,
            SyncError::Application(
                ApplicationError::RequestFailed { .. }
                    | ApplicationError::UndecodableResponse { .. }
            )
        )
    }
}

impl ErrorMeta for SyncError {
    fn code(&self) -> ErrorCode {
        match self {
            SyncError::Internal(e) => e.code(),
            SyncError::Application(e) => e.code(),
        }
    }

    fn key(&self) -> ErrorKey {
        match self {
            SyncError::Internal(e) => e.key(),
            SyncError::Application(e) => e.key(),
        }
    }

    fn message(&self) -> ErrorMessage {
        match self {
            SyncError::Internal(e) => e.message(),
            SyncError::Application(e) => e.message(),
        }
    }
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SyncError::Internal(e) => write!(f, "{}", e),
            SyncError::Application(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_function() {
        let internal_error: SyncError = InternalError::timeout("test", None);

        assert_eq!(internal_error.code(), ErrorCode(1000));
        assert_eq!(internal_error.key(), ErrorKey::internal("timeout", None));
        assert_eq!(internal_error.message(), ErrorMessage("test".to_string()));
    }

    #[test]
    fn test_error_key() {
        let key = ErrorKey::application("request_failed", Some("401"));
        assert_eq!(key.to_string(), "err::application::request_failed::401");
    }

    #[test]
    fn test_subtype_is_normalized() {
        let err = ApplicationError::authentication_failed("bad", Some("Missing Credentials"));

        assert_eq!(
            err.key().to_string(),
            "err::application::authentication_failed::missing_credentials"
        );
    }

    #[test]
    fn test_classification() {
        let auth = ApplicationError::authentication_failed("denied", Some("401"));
        let http = ApplicationError::request_failed("boom", Some("500"));
        let decode = ApplicationError::undecodable_response("empty body", None);
        let timeout = InternalError::timeout("slow", None);
        let early = ApplicationError::not_authenticated("no session", None);
        let config = InternalError::configuration_error("missing", None);

        assert!(auth.is_auth_error() && !auth.is_query_error());
        assert!(http.is_query_error());
        assert!(decode.is_query_error());
        assert!(timeout.is_query_error());
        assert!(early.is_not_authenticated() && !early.is_query_error());
        assert!(!config.is_query_error() && matches!(config, SyncError::Internal(_)));
        assert!(http.is_response_error() && decode.is_response_error());
        assert!(!timeout.is_response_error());
        assert_ne!(http.code(), decode.code());
    }

    #[test]
    fn test_status() {
        assert_eq!(
            ApplicationError::authentication_failed("denied", Some("401")).status(),
            Some(401)
        );
        assert_eq!(
            ApplicationError::request_failed("boom", Some("503")).status(),
            Some(503)
        );
        assert_eq!(
            ApplicationError::undecodable_response("empty", None).status(),
            None
        );
    }

    #[test]
    fn test_sync_error_survives_anyhow() {
        let err = ApplicationError::request_failed("test", Some("500"));
        let any_err: anyhow::Error = err.clone().into();

        assert_eq!(any_err.downcast_ref::<SyncError>(), Some(&err));
    }
}
