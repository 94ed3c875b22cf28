//! Opaque handle for the statement a user picked for analysis.

use serde::{Deserialize, Serialize};

/// Statement formats the analyzer is expected to understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementKind {
    Pdf,
    Xlsx,
    Xls,
    Csv,
    Unknown,
}

impl StatementKind {
    /// Infer the kind from a file name's extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => StatementKind::Pdf,
            "xlsx" => StatementKind::Xlsx,
            "xls" => StatementKind::Xls,
            "csv" => StatementKind::Csv,
            _ => StatementKind::Unknown,
        }
    }

    /// MIME type sent with the multipart upload.
    pub fn mime(&self) -> &'static str {
        match self {
            StatementKind::Pdf => "application/pdf",
            StatementKind::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            StatementKind::Xls => "application/vnd.ms-excel",
            StatementKind::Csv => "text/csv",
            StatementKind::Unknown => "application/octet-stream",
        }
    }
}

/// File name plus raw bytes. The core never looks inside the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFile {
    name: String,
    bytes: Vec<u8>,
}

impl StatementFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn kind(&self) -> StatementKind {
        StatementKind::from_file_name(&self.name)
    }
}
