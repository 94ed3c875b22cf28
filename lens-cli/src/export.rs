use anyhow::{Context, Result};
use lens_core::Transaction;
use std::path::Path;
use tracing::info;

/// Write validated transactions as `date,description,category,amount`.
pub fn write_csv(path: &Path, transactions: &[Transaction]) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for t in transactions {
        wtr.serialize(t)
            .with_context(|| format!("write {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("flush {}", path.display()))?;
    info!(path = %path.display(), rows = transactions.len(), "exported transactions");
    Ok(())
}
