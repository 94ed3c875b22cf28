//! reqwest-backed transport for the statement analyzer service.
//!
//! The service takes a multipart POST with a `file` part and a `password`
//! text part, and answers with a JSON array of transactions (or a JSON object
//! carrying `detail` on failure).

use anyhow::{Context, Result, bail};
use lens_core::StatementFile;
use lens_ingest::decode_payload;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;

use crate::transport::{RawResponse, Transport, TransportFailure};

pub const DEFAULT_ANALYZE_PATH: &str = "/analyze-statement/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct HttpAnalyzer {
    client: reqwest::Client,
    base_url: String,
    analyze_path: String,
    timeout: Duration,
}

impl HttpAnalyzer {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            timeout,
        })
    }

    pub fn with_analyze_path(mut self, path: impl Into<String>) -> Self {
        self.analyze_path = path.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn analyze_url(&self) -> String {
        join_url(&self.base_url, &self.analyze_path)
    }

    /// Ask the service root whether the backend is up. Returns its `status`.
    pub async fn health(&self) -> Result<String> {
        let url = join_url(&self.base_url, "/");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("health check failed: {status} {txt}");
        }

        let body: Value = resp.json().await.context("parse health response")?;
        body.get("status")
            .and_then(Value::as_str)
            .map(str::to_string)
            .with_context(|| format!("unexpected health response: {body}"))
    }

    fn classify(&self, e: reqwest::Error) -> TransportFailure {
        if e.is_timeout() {
            TransportFailure::Timeout {
                after: self.timeout,
            }
        } else {
            TransportFailure::Unreachable {
                reason: e.to_string(),
            }
        }
    }
}

impl Transport for HttpAnalyzer {
    async fn submit(
        &self,
        file: &StatementFile,
        password: &str,
    ) -> Result<RawResponse, TransportFailure> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.kind().mime())
            .map_err(|e| self.classify(e))?;

        let form = Form::new()
            .part("file", part)
            .text("password", password.to_string());

        let url = self.analyze_url();
        tracing::debug!(%url, file = file.name(), bytes = file.len(), "uploading statement");

        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(|e| self.classify(e))?;
        tracing::debug!(status, body_len = text.len(), "analyzer responded");

        Ok(RawResponse::new(status, decode_payload(&text)))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
