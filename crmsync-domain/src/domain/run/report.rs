use super::stage::RunStage;
use crate::{record::extraction::Extraction, record::window::ChangeWindow, SyncError};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use strum::AsRefStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum RecordKind {
    Organization,
    User,
}

/// One destination write that the ticketing platform acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOutcome {
    pub kind: RecordKind,
    pub external_id: String,
    pub destination_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<u64>,
}

impl RecordOutcome {
    pub fn organization(external_id: &str, destination_id: Option<u64>) -> Self {
        Self {
            kind: RecordKind::Organization,
            external_id: external_id.to_owned(),
            destination_id,
            organization_id: None,
        }
    }

    pub fn user(
        external_id: &str,
        destination_id: Option<u64>,
        organization_id: Option<u64>,
    ) -> Self {
        Self {
            kind: RecordKind::User,
            external_id: external_id.to_owned(),
            destination_id,
            organization_id,
        }
    }
}

/// Outcome of a single run.
///
/// Writes are never rolled back, so `records` lists every acknowledged
/// upsert even when the run failed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub stage: RunStage,
    pub failed_during: Option<RunStage>,
    pub error: Option<SyncError>,
    pub window: Option<ChangeWindow>,
    pub extracted_accounts: usize,
    pub extracted_contacts: usize,
    pub records: Vec<RecordOutcome>,
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            stage: RunStage::Idle,
            failed_during: None,
            error: None,
            window: None,
            extracted_accounts: 0,
            extracted_contacts: 0,
            records: Vec::new(),
        }
    }

    /// Moves to the next stage of the chain. Terminal stages stay put.
    pub fn advance(&mut self) -> RunStage {
        if let Some(next) = self.stage.successor() {
            self.stage = next;
        }
        self.stage
    }

    /// Halts the run while it was trying to reach the next stage.
    pub fn fail(&mut self, error: SyncError) {
        if self.stage.is_terminal() {
            return;
        }
        self.failed_during = self.stage.successor();
        self.stage = RunStage::Failed;
        self.error = Some(error);
    }

    pub fn record_extraction(&mut self, extraction: &Extraction) {
        self.window = Some(extraction.window);
        self.extracted_accounts = extraction.accounts.len();
        self.extracted_contacts = extraction.contact_count();
    }

    pub fn is_success(&self) -> bool {
        self.stage == RunStage::Loaded
    }

    pub fn count(&self, kind: RecordKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "stage: {}, accounts: {}, contacts: {}, organizations upserted: {}, users upserted: {}",
            self.stage,
            self.extracted_accounts,
            self.extracted_contacts,
            self.count(RecordKind::Organization),
            self.count(RecordKind::User),
        )?;

        if let (Some(stage), Some(error)) = (self.failed_during, &self.error) {
            write!(f, ", failed during {stage}: {error}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApplicationError;

    #[test]
    fn test_successful_run() {
        let mut report = RunReport::new();

        for _ in 0..4 {
            report.advance();
        }
        report.records.push(RecordOutcome::organization("001A", Some(1)));
        report.records.push(RecordOutcome::user("001A", Some(7), Some(1)));

        assert!(report.is_success());
        assert_eq!(report.advance(), RunStage::Loaded);
        assert_eq!(report.count(RecordKind::Organization), 1);
        assert_eq!(report.count(RecordKind::User), 1);
    }

    #[test]
    fn test_failure_records_the_attempted_stage() {
        let mut report = RunReport::new();
        report.fail(ApplicationError::authentication_failed("denied", Some("401")));

        assert_eq!(report.stage, RunStage::Failed);
        assert_eq!(report.failed_during, Some(RunStage::SourceAuthenticated));
        assert!(!report.is_success());
        assert!(report.to_string().contains("failed during source-authenticated"));
    }

    #[test]
    fn test_failed_report_does_not_advance() {
        let mut report = RunReport::new();
        report.advance();
        report.fail(ApplicationError::request_failed("boom", Some("500")));
        report.fail(ApplicationError::request_failed("again", Some("500")));

        assert_eq!(report.advance(), RunStage::Failed);
        assert_eq!(report.failed_during, Some(RunStage::Extracted));
        assert_eq!(
            report.error.as_ref().map(|e| e.to_string()),
            Some("Request failed: boom".to_string())
        );
    }
}
