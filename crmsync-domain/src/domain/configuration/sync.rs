use super::{destination::DestinationConfig, source::SourceConfig};
use crate::{ChangeWindow, InternalError, SyncError};
use chrono::Utc;
use envconfig::Envconfig;
use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    time::Duration,
};

#[derive(Envconfig, Clone)] // Intentionally no Debug so secret is not printed
pub struct SyncConfig {
    #[envconfig(from = "SYNC_WINDOW_SECS", default = "3600")] // 1 hour
    pub window_secs: u64,
    #[envconfig(from = "HTTP_CLIENT_TIMEOUT_SECS", default = "30")]
    pub http_client_timeout_secs: u64,
    #[envconfig(nested = true)]
    pub source: SourceConfig,
    #[envconfig(nested = true)]
    pub destination: DestinationConfig,
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the configuration from explicitly passed parameters, letting any
    /// variable present in the process environment take precedence.
    pub fn resolve(explicit: &HashMap<String, String>) -> Result<Self, SyncError> {
        Self::resolve_with(explicit, std::env::vars())
    }

    fn resolve_with(
        explicit: &HashMap<String, String>,
        environment: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, SyncError> {
        let mut merged = explicit.clone();
        merged.extend(environment);

        Self::init_from_hashmap(&merged).map_err(|e| {
            InternalError::configuration_error(&format!("Could not load config: {e}"), None)
        })
    }

    pub fn with_window_secs(mut self, window_secs: u64) -> Self {
        self.window_secs = window_secs;
        self
    }

    /// Length of the change window that ends at the moment a run starts.
    pub fn window(&self) -> Result<chrono::Duration, SyncError> {
        i64::try_from(self.window_secs)
            .ok()
            .filter(|secs| *secs > 0)
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| {
                InternalError::configuration_error(
                    &format!("Invalid SYNC_WINDOW_SECS: {}", self.window_secs),
                    Some("window"),
                )
            })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_client_timeout_secs)
    }

    /// Rejects configurations that could never complete a run, before any
    /// network call is made.
    pub fn validate(&self) -> Result<(), SyncError> {
        ChangeWindow::ending_at(Utc::now(), self.window()?)?;

        if self.http_client_timeout_secs == 0 {
            return Err(InternalError::configuration_error(
                "HTTP_CLIENT_TIMEOUT_SECS must be greater than zero",
                Some("timeout"),
            ));
        }

        let missing = self
            .source
            .missing_credentials()
            .into_iter()
            .chain(self.destination.missing_credentials())
            .collect::<Vec<_>>();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(InternalError::configuration_error(
                &format!("Missing credentials: {}", missing.join(", ")),
                Some("credentials"),
            ))
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            window_secs: 3600,
            http_client_timeout_secs: 30,
            source: SourceConfig::default(),
            destination: DestinationConfig::default(),
        }
    }
}

impl Display for SyncConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SYNC_WINDOW_SECS: {}", self.window_secs)?;
        writeln!(
            f,
            "HTTP_CLIENT_TIMEOUT_SECS: {}",
            self.http_client_timeout_secs
        )?;
        write!(f, "{}", self.source)?;
        write!(f, "{}", self.destination)
    }
}
