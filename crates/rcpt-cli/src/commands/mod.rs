//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod scan;

use std::path::Path;

use rcpt_core::RcptConfig;

/// Environment variables searched for the API key, in order.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Resolve the API key from a flag value or the environment.
pub(crate) fn resolve_api_key(flag: Option<&str>) -> Option<String> {
    if let Some(key) = flag {
        return Some(key.to_string());
    }
    API_KEY_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
}

/// Load configuration from an explicit path, the default location, or
/// built-in defaults.
pub(crate) fn load_config(path: Option<&str>) -> anyhow::Result<RcptConfig> {
    if let Some(p) = path {
        return Ok(RcptConfig::from_file(Path::new(p))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        return Ok(RcptConfig::from_file(&default_path)?);
    }

    Ok(RcptConfig::default())
}
