use anyhow::{Context, Result};
use crmsync_domain::{
    telemetry::{get_subscriber, init_subscriber},
    SyncConfig,
};
use crmsync_pipeline::SyncJob;
use dotenvy::dotenv;
use std::{collections::HashMap, process::ExitCode};
use tracing::{info, warn};

/// `KEY=VALUE` arguments stand in for variables missing from the environment.
fn explicit_parameters() -> HashMap<String, String> {
    std::env::args()
        .skip(1)
        .filter_map(|arg| match arg.split_once('=') {
            Some((key, value)) => Some((key.trim().to_owned(), value.to_owned())),
            None => {
                warn!("Ignoring argument {arg:?}, expected KEY=VALUE");
                None
            }
        })
        .collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenv().ok();

    let subscriber = get_subscriber("crmsync".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let config = SyncConfig::resolve(&explicit_parameters()).context("Could not load config")?;

    info!("Starting crmsync with config:\n{config}");

    let mut job = SyncJob::from_config(&config).context("Could not create sync job")?;
    let report = job.run().await;

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
