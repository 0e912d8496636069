use crate::{extractor::Extractor, reconciler::Reconciler};
use chrono::{DateTime, Utc};
use crmsync_client::{DestinationApi, SalesforceClient, SourceApi, ZendeskClient};
use crmsync_domain::{ChangeWindow, RunReport, SyncConfig, SyncError};
use tracing::{error, info};

/// One pass of the sync: authenticate the source, extract, authenticate the
/// destination, load. The first failing step halts the run.
pub struct SyncJob<S: SourceApi, D: DestinationApi> {
    source: S,
    destination: D,
    window: chrono::Duration,
}

impl SyncJob<SalesforceClient, ZendeskClient> {
    pub fn from_config(config: &SyncConfig) -> Result<Self, SyncError> {
        config.validate()?;

        Ok(Self::new(
            SalesforceClient::new(config.source.clone(), config.http_timeout())?,
            ZendeskClient::new(config.destination.clone(), config.http_timeout())?,
            config.window()?,
        ))
    }
}

impl<S: SourceApi, D: DestinationApi> SyncJob<S, D> {
    pub fn new(source: S, destination: D, window: chrono::Duration) -> Self {
        Self {
            source,
            destination,
            window,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn destination(&self) -> &D {
        &self.destination
    }

    pub async fn run(&mut self) -> RunReport {
        self.run_at(Utc::now()).await
    }

    /// Runs with the change window ending at `now`.
    pub async fn run_at(&mut self, now: DateTime<Utc>) -> RunReport {
        let mut report = RunReport::new();
        info!("Sync run starting at {now}");

        if let Err(err) = self.source.authenticate().await {
            return halt(report, err);
        }
        let stage = report.advance();
        info!("Reached {stage}");

        let window = match ChangeWindow::ending_at(now, self.window) {
            Ok(window) => window,
            Err(err) => return halt(report, err),
        };
        report.window = Some(window);

        let extraction = match Extractor::new(&self.source).extract(window).await {
            Ok(extraction) => extraction,
            Err(err) => return halt(report, err),
        };
        report.record_extraction(&extraction);
        let stage = report.advance();
        info!(
            "Reached {stage} with {} accounts and {} contacts",
            report.extracted_accounts, report.extracted_contacts
        );

        if let Err(err) = self.destination.authenticate().await {
            return halt(report, err);
        }
        let stage = report.advance();
        info!("Reached {stage}");

        let loaded = Reconciler::new(&self.destination)
            .load(&extraction, &mut report.records)
            .await;
        if let Err(err) = loaded {
            return halt(report, err);
        }
        let stage = report.advance();
        info!("Reached {stage}");

        info!("Sync run finished: {report}");
        report
    }
}

fn halt(mut report: RunReport, err: SyncError) -> RunReport {
    report.fail(err);
    error!("Sync run failed: {report}");
    report
}
