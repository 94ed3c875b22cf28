//! lens-analyzer: talk to the remote statement analyzer and drive one
//! upload-analyze-display session.

pub mod error;
pub mod file;
pub mod http;
pub mod session;
pub mod transport;

pub use error::{AnalysisError, SessionNotice};
pub use file::read_statement;
pub use http::HttpAnalyzer;
pub use session::{SessionController, SessionPhase, SessionState, Submission};
pub use transport::{RawResponse, Transport, TransportFailure};
