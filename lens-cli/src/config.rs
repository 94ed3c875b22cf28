use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::{ensure_dir, ensure_lens_home};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSection,
    pub display: DisplaySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Root of the analyzer service; `GET /` doubles as its health check
    pub base_url: String,
    pub analyze_path: String,
    /// Upper bound on one analysis request
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Transaction rows printed in the table (0 = all)
    pub max_rows: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            analyze_path: "/analyze-statement/".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self { max_rows: 50 }
    }
}

impl ServerSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.server.timeout_secs == 0 {
            bail!("server.timeout_secs must be at least 1");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_path_in(&ensure_lens_home()?))
}

pub fn config_path_in(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid {}", p.display()))?;
    Ok(cfg)
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let home = ensure_lens_home()?;
    let p = config_path_in(&home);
    if init_config_in(&home)? {
        println!("Wrote {}", p.display());
    } else {
        println!("Config already exists: {}", p.display());
    }
    Ok(())
}

/// Write defaults under `home` unless a config is already there. Returns
/// whether a file was written.
pub fn init_config_in(home: &Path) -> Result<bool> {
    ensure_dir(home)?;
    let p = config_path_in(home);
    if p.exists() {
        return Ok(false);
    }
    save_config_to(&Config::default(), &p)?;
    Ok(true)
}
