use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Output directory used when neither the config file nor the CLI names one.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// File name used for URLs whose path is empty or `/`.
pub const DEFAULT_INDEX_NAME: &str = "index.html";

/// Global configuration loaded from `~/.config/harx/config.toml`.
///
/// Every field is optional in the file; command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarxConfig {
    /// Directory extracted files are written under.
    pub output_dir: PathBuf,
    /// Prefix every extracted path with the request's host.
    pub group_by_host: bool,
    /// File name for root URLs (`https://example.com/`).
    pub index_name: String,
}

impl Default for HarxConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            group_by_host: false,
            index_name: DEFAULT_INDEX_NAME.to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("harx")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Load configuration from the XDG config dir, or defaults if no file exists.
///
/// Unlike a first-run init, this never writes a config file.
pub fn load() -> Result<HarxConfig> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!("no config at {}; using defaults", path.display());
        return Ok(HarxConfig::default());
    }
    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<HarxConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: HarxConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
