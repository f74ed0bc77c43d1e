//! Configuration file discovery and loading.
//!
//! The discovery order is:
//! 1. `GLOSSA_CONFIG` environment variable (any path).
//! 2. `~/.glossa/config.json`
//! 3. `~/.glossa/config.toml`
//! 4. If none found, defaults are used.
//!
//! JSON keys are normalized from camelCase to snake_case before
//! deserialization. TOML files are read as-is (TOML configs are written in
//! snake_case).

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::Config;
use crate::error::{GlossaError, Result};

/// Environment variable that overrides config discovery.
pub const CONFIG_ENV_VAR: &str = "GLOSSA_CONFIG";

/// Discover the config file path using the fallback chain.
///
/// `env_override` is the value of [`CONFIG_ENV_VAR`], if set. It is
/// returned without an existence check so a typo surfaces as an error
/// rather than silently falling back.
pub fn discover_config_path(
    env_override: Option<String>,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }

    let dir = home_dir?.join(".glossa");
    ["config.json", "config.toml"]
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Load configuration via discovery, falling back to defaults.
pub fn load_config() -> Result<Config> {
    let env_override = std::env::var(CONFIG_ENV_VAR).ok();
    match discover_config_path(env_override, dirs::home_dir()) {
        Some(path) => load_config_from(&path),
        None => {
            tracing::info!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load and validate configuration from an explicit path.
///
/// The format is chosen by extension: `.toml` is TOML, anything else JSON.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(GlossaError::config(format!(
            "config file not found: {}",
            path.display()
        )));
    }

    tracing::debug!(path = %path.display(), "loading config file");
    let contents = std::fs::read_to_string(path)?;

    let config: Config = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&contents)?
    } else {
        let value: Value = serde_json::from_str(&contents)?;
        serde_json::from_value(normalize_keys(value))?
    };

    config.validate()?;
    Ok(config)
}

/// Convert camelCase JSON keys to snake_case recursively.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, val)| (camel_to_snake(&key), normalize_keys(val)))
                .collect(),
        ),
        Value::Array(arr) => Value::Array(arr.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Snake-case one config key, so `preconfigureNumber` and
/// `preconfigure_number` name the same field.
///
/// A run of capitals is one word: `CMUDict` becomes `cmu_dict`.
///
/// ```
/// # use glossa_types::loader::camel_to_snake;
/// assert_eq!(camel_to_snake("acousticModelsUrl"), "acoustic_models_url");
/// assert_eq!(camel_to_snake("audioURL"), "audio_url");
/// ```
pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;
    let mut chars = key.chars().peekable();
    while let Some(ch) = chars.next() {
        let word_start = ch.is_uppercase()
            && match prev {
                Some(p) if p.is_lowercase() => true,
                Some(p) if p.is_uppercase() => chars.peek().is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
        if word_start {
            out.push('_');
        }
        out.push(ch.to_ascii_lowercase());
        prev = Some(ch);
    }
    out
}
