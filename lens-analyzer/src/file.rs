use anyhow::{Context, Result, bail};
use lens_core::StatementFile;
use std::fs;
use std::path::Path;

/// Load a statement from disk into an upload handle.
pub fn read_statement(path: impl AsRef<Path>) -> Result<StatementFile> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("not a file path: {}", path.display()))?;

    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    if bytes.is_empty() {
        bail!("{} is empty", path.display());
    }

    Ok(StatementFile::new(name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_core::StatementKind;

    #[test]
    fn test_reads_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("Axis-Mar.PDF");
        fs::write(&p, b"%PDF-1.7").unwrap();

        let f = read_statement(&p).unwrap();
        assert_eq!(f.name(), "Axis-Mar.PDF");
        assert_eq!(f.bytes(), b"%PDF-1.7");
        assert_eq!(f.kind(), StatementKind::Pdf);
    }

    #[test]
    fn test_missing_and_empty_files_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_statement(dir.path().join("nope.pdf")).is_err());

        let p = dir.path().join("empty.csv");
        fs::write(&p, b"").unwrap();
        let err = read_statement(&p).unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }
}
