//! Analysis session: one upload-analyze-display cycle.
//!
//! [`SessionState`] holds the five fields the display layer reacts to and
//! changes only through the transition methods below. [`SessionController`]
//! pairs a state with a [`Transport`] and runs a submission end to end.

use lens_core::{CategoryTotals, Dashboard, StatementFile, Summary, Transaction};
use lens_core::{compute_category_totals, compute_summary};
use lens_ingest::validate_with_report;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{AnalysisError, SessionNotice};
use crate::transport::{RawResponse, Transport, TransportFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    FileSelected,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    selected_file: Option<StatementFile>,
    password: String,
    transactions: Vec<Transaction>,
    notice: Option<SessionNotice>,
    is_loading: bool,
    phase: SessionPhase,
}

/// Borrowed view of what is about to be uploaded.
#[derive(Debug, Clone, Copy)]
pub struct Submission<'a> {
    pub file: &'a StatementFile,
    pub password: &'a str,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new file invalidates any previous result. Loading is left alone.
    pub fn select_file(&mut self, file: StatementFile) {
        self.selected_file = Some(file);
        self.transactions.clear();
        self.notice = None;
        self.phase = SessionPhase::FileSelected;
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Enter `Submitting` and hand back what to upload, or record the input
    /// error when no file is selected.
    pub fn begin_submit(&mut self) -> Result<Submission<'_>, AnalysisError> {
        let Some(file) = self.selected_file.as_ref() else {
            self.notice = Some(SessionNotice::Error(AnalysisError::NoFileSelected));
            return Err(AnalysisError::NoFileSelected);
        };

        self.is_loading = true;
        self.notice = None;
        self.transactions.clear();
        self.phase = SessionPhase::Submitting;

        Ok(Submission {
            file,
            password: &self.password,
        })
    }

    /// Leave `Submitting` with whatever the transport produced.
    pub fn finish(&mut self, outcome: Result<RawResponse, TransportFailure>) {
        self.is_loading = false;

        match classify(outcome) {
            Ok(body) => {
                let report = validate_with_report(&body);
                for (index, reason) in &report.rejected {
                    debug!(index, ?reason, "dropped analyzer record");
                }
                info!(
                    inspected = report.inspected,
                    kept = report.transactions.len(),
                    "analysis complete"
                );

                self.transactions = report.transactions;
                self.notice = if self.transactions.is_empty() {
                    Some(SessionNotice::NoTransactions)
                } else {
                    None
                };
                self.phase = SessionPhase::Succeeded;
            }
            Err(e) => {
                warn!(error = %e, "analysis failed");
                self.transactions.clear();
                self.notice = Some(SessionNotice::Error(e));
                self.phase = SessionPhase::Failed;
            }
        }
    }

    /// Drop the file, password and any result.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn selected_file(&self) -> Option<&StatementFile> {
        self.selected_file.as_ref()
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn notice(&self) -> Option<&SessionNotice> {
        self.notice.as_ref()
    }

    /// Hard failure only; the informational empty result is not an error.
    pub fn error(&self) -> Option<&AnalysisError> {
        self.notice.as_ref().and_then(SessionNotice::as_error)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn summary(&self) -> Summary {
        compute_summary(&self.transactions)
    }

    pub fn category_totals(&self) -> CategoryTotals {
        compute_category_totals(&self.transactions)
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::from_transactions(self.transactions.clone())
    }
}

/// Map a transport outcome onto the error taxonomy; success yields the body.
fn classify(outcome: Result<RawResponse, TransportFailure>) -> Result<Value, AnalysisError> {
    match outcome {
        Ok(resp) if resp.is_success() => Ok(resp.body),
        Ok(resp) => Err(AnalysisError::Server {
            status: resp.status,
            detail: resp.detail(),
        }),
        Err(TransportFailure::Timeout { after }) => Err(AnalysisError::Timeout {
            secs: whole_seconds_ceil(after),
        }),
        Err(TransportFailure::Unreachable { reason }) => {
            debug!(%reason, "transport unreachable");
            Err(AnalysisError::Network)
        }
    }
}

/// Reported bounds round up so a sub-second timeout never reads as 0 seconds.
fn whole_seconds_ceil(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}

/// Owns one session and the transport it submits through. `&mut self` on
/// [`submit`](Self::submit) keeps at most one request in flight.
pub struct SessionController<T: Transport> {
    transport: T,
    state: SessionState,
}

impl<T: Transport> SessionController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: SessionState::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn select_file(&mut self, file: StatementFile) {
        info!(file = file.name(), bytes = file.len(), "statement selected");
        self.state.select_file(file);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.state.set_password(password);
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Run one submission. Without a selected file the transport is never called.
    pub async fn submit(&mut self) -> &SessionState {
        let outcome = match self.state.begin_submit() {
            Ok(sub) => {
                info!(file = sub.file.name(), "submitting statement");
                Some(self.transport.submit(sub.file, sub.password).await)
            }
            Err(e) => {
                warn!(error = %e, "submission rejected");
                None
            }
        };

        if let Some(outcome) = outcome {
            self.state.finish(outcome);
        }
        &self.state
    }
}
