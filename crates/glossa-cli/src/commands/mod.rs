//! CLI command implementations for `glossa`.
//!
//! - [`transliterate`] -- Greek/English vocabulary to recognizer input.
//! - [`fingerprint`] -- configuration fingerprint of a request.
//! - [`config_cmd`] -- resolved configuration and generic Greek setup.
//! - [`stress`] -- drive the worker pool with a simulated backend.

pub mod config_cmd;
pub mod fingerprint;
pub mod stress;
pub mod transliterate;

use std::path::Path;

use glossa_types::config::Config;
use glossa_types::loader;

/// Load configuration from the given path override or via auto-discovery.
///
/// Without an override the discovery chain is:
/// 1. `GLOSSA_CONFIG` env var
/// 2. `~/.glossa/config.json`
/// 3. `~/.glossa/config.toml`
///
/// Returns a default `Config` if no config file is found.
pub fn load_config(config_override: Option<&str>) -> anyhow::Result<Config> {
    let config = match config_override {
        Some(path_str) => {
            let path = Path::new(path_str);
            if !path.exists() {
                anyhow::bail!("config file not found: {path_str}");
            }
            loader::load_config_from(path)?
        }
        None => loader::load_config()?,
    };
    Ok(config)
}
