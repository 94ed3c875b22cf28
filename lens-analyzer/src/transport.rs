//! Contract between the session and whatever carries the statement to the
//! analyzer.

use std::future::Future;
use std::time::Duration;

use lens_core::StatementFile;
use serde_json::Value;
use thiserror::Error;

/// Any HTTP answer from the analyzer, successful or not.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// Decoded body; `Null` when it was not JSON
    pub body: Value,
}

impl RawResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The analyzer's `detail` field, if any. Non-string details are rendered
    /// as compact JSON.
    pub fn detail(&self) -> Option<String> {
        match self.body.get("detail")? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// No HTTP answer was obtained at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    #[error("no response within {after:?}")]
    Timeout { after: Duration },

    #[error("analyzer unreachable: {reason}")]
    Unreachable { reason: String },
}

/// Uploads a statement and returns the analyzer's answer.
pub trait Transport {
    fn submit(
        &self,
        file: &StatementFile,
        password: &str,
    ) -> impl Future<Output = Result<RawResponse, TransportFailure>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_range() {
        assert!(RawResponse::new(200, Value::Null).is_success());
        assert!(RawResponse::new(204, Value::Null).is_success());
        assert!(!RawResponse::new(199, Value::Null).is_success());
        assert!(!RawResponse::new(400, Value::Null).is_success());
        assert!(!RawResponse::new(500, Value::Null).is_success());
    }

    #[test]
    fn test_detail_extraction() {
        let r = RawResponse::new(400, json!({"detail": "Invalid file type. Please upload a PDF."}));
        assert_eq!(r.detail().as_deref(), Some("Invalid file type. Please upload a PDF."));

        let r = RawResponse::new(422, json!({"detail": [{"loc": ["body", "file"], "msg": "field required"}]}));
        assert_eq!(
            r.detail().as_deref(),
            Some(r#"[{"loc":["body","file"],"msg":"field required"}]"#)
        );

        assert_eq!(RawResponse::new(500, json!({"detail": null})).detail(), None);
        assert_eq!(RawResponse::new(500, json!({"error": "x"})).detail(), None);
        assert_eq!(RawResponse::new(500, Value::Null).detail(), None);
        assert_eq!(RawResponse::new(500, json!(["detail"])).detail(), None);
    }
}
