//! lens-ingest: turn the analyzer's untrusted response into typed transactions.

pub mod payload;
pub mod validate;

pub use payload::decode_payload;
pub use validate::{Rejection, Validation, admit, validate, validate_with_report};
