//! Where `lens` keeps its files: `$LENS_HOME`, else `~/.lens`.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

pub const HOME_OVERRIDE_VAR: &str = "LENS_HOME";

pub fn lens_home() -> Result<PathBuf> {
    resolve_home(
        std::env::var_os(HOME_OVERRIDE_VAR).map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

/// A non-empty override wins; otherwise `<home>/.lens`.
fn resolve_home(override_dir: Option<PathBuf>, home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    match home {
        Some(h) if !h.as_os_str().is_empty() => Ok(h.join(".lens")),
        _ => bail!("neither {HOME_OVERRIDE_VAR} nor HOME is set"),
    }
}

pub fn ensure_lens_home() -> Result<PathBuf> {
    let dir = lens_home()?;
    ensure_dir(&dir)?;
    Ok(dir)
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
}
