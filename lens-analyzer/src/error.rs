//! User-facing failure taxonomy for an analysis session.

use std::fmt;

use thiserror::Error;

/// Everything that can go wrong with one submission, classified once at the
/// session boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Please select a file first.")]
    NoFileSelected,

    #[error(
        "The request timed out after {secs} seconds. The file may be too large or the analysis is taking too long."
    )]
    Timeout { secs: u64 },

    #[error("Could not connect to the server. Please make sure the analysis service is running.")]
    Network,

    #[error("{}", server_message(.status, .detail))]
    Server { status: u16, detail: Option<String> },
}

fn server_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(d) => d.clone(),
        None => format!("Server error: {status}"),
    }
}

/// What the display layer shows next to (or instead of) the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    Error(AnalysisError),
    /// The analyzer answered, but nothing survived validation.
    NoTransactions,
}

impl SessionNotice {
    /// True for "nothing to show"; false for a hard failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, SessionNotice::NoTransactions)
    }

    pub fn as_error(&self) -> Option<&AnalysisError> {
        match self {
            SessionNotice::Error(e) => Some(e),
            SessionNotice::NoTransactions => None,
        }
    }
}

impl fmt::Display for SessionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionNotice::Error(e) => e.fmt(f),
            SessionNotice::NoTransactions => {
                f.write_str("No valid transactions could be extracted from this statement.")
            }
        }
    }
}

impl From<AnalysisError> for SessionNotice {
    fn from(e: AnalysisError) -> Self {
        SessionNotice::Error(e)
    }
}
