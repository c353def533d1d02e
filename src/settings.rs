use anyhow::{Context, Result};
use std::{env, fs, path::Path, path::PathBuf};

use crate::analysis::ExtractorConfig;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "DESIGN_EXTRACTOR_CONFIG";

/// Read an `ExtractorConfig` from a JSON file. A missing file gives the
/// defaults; keys left out of the file keep their default values.
pub fn load_config(path: &Path) -> Result<ExtractorConfig> {
    if !path.exists() {
        return Ok(ExtractorConfig::default());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

/// Config named by `DESIGN_EXTRACTOR_CONFIG`, or the defaults.
pub fn config_from_env() -> Result<ExtractorConfig> {
    match env::var_os(CONFIG_ENV_VAR) {
        Some(path) => load_config(&PathBuf::from(path)),
        None => Ok(ExtractorConfig::default()),
    }
}
