//! `glossa config` -- display resolved configuration.
//!
//! # Examples
//!
//! ```text
//! glossa config show
//! glossa config sphinx --config ./glossa.toml
//! ```

use glossa_types::config::{Config, SphinxConfiguration};

/// Render the resolved configuration as formatted JSON.
pub fn config_show(config: &Config) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Render the generic Greek recognizer configuration derived from the
/// configured model paths.
pub fn config_sphinx(config: &Config) -> anyhow::Result<String> {
    let sphinx = SphinxConfiguration::generic_greek(&config.models);
    Ok(serde_json::to_string_pretty(&sphinx)?)
}
