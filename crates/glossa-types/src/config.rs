//! Configuration schema types.
//!
//! All structs accept both `snake_case` and `camelCase` field names via
//! `#[serde(alias)]`, and every field has a default so a partial (or empty)
//! config file is valid. Unknown fields are ignored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GlossaError, Result};
use crate::request::RecognitionConfig;

// ── Root config ──────────────────────────────────────────────────────────

/// Root configuration for glossa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Recognition worker pool settings.
    #[serde(default)]
    pub pool: PoolConfig,

    /// Locations of recognizer libraries and models.
    #[serde(default)]
    pub models: ModelPaths,

    /// English pronunciation lookup settings.
    #[serde(default)]
    pub english: EnglishConfig,
}

impl Config {
    /// Check semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.pool.validate()?;
        for (i, pre) in self.pool.preconfigurations.iter().enumerate() {
            pre.validate().map_err(|e| {
                GlossaError::config(format!("pool.preconfigurations[{i}]: {e}"))
            })?;
        }
        Ok(())
    }
}

// ── Pool ─────────────────────────────────────────────────────────────────

/// Worker pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of backend workers (slots). Fixed for the process lifetime.
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Configure some workers at startup instead of on first use.
    #[serde(default)]
    pub preconfigure: bool,

    /// How many workers to preconfigure. Truncated to `threads`.
    #[serde(default, alias = "preconfigureNumber")]
    pub preconfigure_number: usize,

    /// Distinct startup configurations, assigned round-robin.
    #[serde(default)]
    pub preconfigurations: Vec<RecognitionConfig>,
}

fn default_threads() -> usize {
    2
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            preconfigure: false,
            preconfigure_number: 0,
            preconfigurations: Vec::new(),
        }
    }
}

impl PoolConfig {
    /// Reject a pool that could never serve a request.
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(GlossaError::config("pool.threads must be at least 1"));
        }
        Ok(())
    }

    /// Startup configuration for each slot, `None` meaning "unconfigured".
    ///
    /// The result always has exactly `threads` entries. The first
    /// `preconfigure_number` slots (at most `threads`) cycle through the
    /// provided preconfigurations; the rest stay unconfigured.
    pub fn preconfiguration_plan(&self) -> Vec<Option<RecognitionConfig>> {
        let mut plan = vec![None; self.threads];
        if !self.preconfigure {
            return plan;
        }

        let mut count = self.preconfigure_number;
        if count > self.threads {
            tracing::warn!(
                requested = count,
                threads = self.threads,
                "preconfigurations requested exceed worker count, truncating"
            );
            count = self.threads;
        }

        if self.preconfigurations.is_empty() {
            tracing::error!("preconfiguration requested, but none was provided");
            return plan;
        }

        let unique = self.preconfigurations.len().min(count.max(1));
        for (i, slot) in plan.iter_mut().take(count).enumerate() {
            *slot = Some(self.preconfigurations[i % unique].clone());
        }
        tracing::debug!(count, unique, "preconfiguration plan built");
        plan
    }
}

// ── Models ───────────────────────────────────────────────────────────────

/// Filesystem roots for the recognizer's libraries and models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPaths {
    /// Directory holding the recognizer's jar files.
    #[serde(default = "default_jar_files_url", alias = "sphinxJarFilesUrl")]
    pub sphinx_jar_files_url: String,

    /// The recognizer's main jar file name.
    #[serde(default = "default_jar_file", alias = "sphinxJarFile")]
    pub sphinx_jar_file: String,

    /// Root of the recognizer wrapper package.
    #[serde(default = "default_package_url", alias = "sphinxPackageUrl")]
    pub sphinx_package_url: String,

    /// Root of the language model packs.
    #[serde(default = "default_language_models_url", alias = "languageModelsUrl")]
    pub language_models_url: String,

    /// Root of the acoustic models.
    #[serde(default = "default_acoustic_models_url", alias = "acousticModelsUrl")]
    pub acoustic_models_url: String,
}

fn default_jar_files_url() -> String {
    "/usr/share/glossa/sphinx4/lib".into()
}
fn default_jar_file() -> String {
    "sphinx4-core-5prealpha-SNAPSHOT.jar".into()
}
fn default_package_url() -> String {
    "/usr/share/glossa/sphinx4".into()
}
fn default_language_models_url() -> String {
    "/usr/share/glossa/language_models".into()
}
fn default_acoustic_models_url() -> String {
    "/usr/share/glossa/acoustic_models".into()
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            sphinx_jar_files_url: default_jar_files_url(),
            sphinx_jar_file: default_jar_file(),
            sphinx_package_url: default_package_url(),
            language_models_url: default_language_models_url(),
            acoustic_models_url: default_acoustic_models_url(),
        }
    }
}

/// Generic recognizer configuration handed to the backend unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SphinxConfiguration {
    pub jar_path: String,
    pub configuration_path: String,
    pub acoustic_model: String,
    pub grammar_name: String,
    pub grammar_folder: String,
    pub dictionary: String,
    pub language_model: String,
    pub grammar_disabled: bool,
}

impl SphinxConfiguration {
    /// The generic Greek configuration (no limited vocabulary).
    ///
    /// There is no Greek statistical model, so dictionary and language model
    /// point at the English pack and grammar is disabled.
    pub fn generic_greek(paths: &ModelPaths) -> Self {
        let lm = paths.language_models_url.trim_end_matches('/');
        Self {
            jar_path: format!(
                ".:{}/{}:{}/src",
                paths.sphinx_jar_files_url.trim_end_matches('/'),
                paths.sphinx_jar_file,
                paths.sphinx_package_url.trim_end_matches('/'),
            ),
            configuration_path: format!("{lm}/greekPack/default.config.xml"),
            acoustic_model: format!(
                "{}/acoustic_model/",
                paths.acoustic_models_url.trim_end_matches('/')
            ),
            grammar_name: "hello".into(),
            grammar_folder: format!("{lm}/greekPack/"),
            dictionary: format!("{lm}/englishPack/cmudict-en-us.dict"),
            language_model: format!("{lm}/englishPack/en-us.lm.bin"),
            grammar_disabled: true,
        }
    }
}

// ── English ──────────────────────────────────────────────────────────────

/// English pronunciation lookup settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnglishConfig {
    /// CMU-format pronouncing dictionary. `None` disables English lookup.
    #[serde(default)]
    pub dictionary: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pre(word: &str) -> RecognitionConfig {
        RecognitionConfig::new("el", vec![word.to_string()], vec![], vec![])
    }

    #[test]
    fn empty_json_gives_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.pool.threads, 2);
        assert!(!cfg.pool.preconfigure);
        assert!(cfg.english.dictionary.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn camel_case_aliases_accepted() {
        let json = r#"{
            "pool": { "threads": 4, "preconfigure": true, "preconfigureNumber": 2 },
            "models": { "languageModelsUrl": "/opt/lm" }
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.pool.threads, 4);
        assert_eq!(cfg.pool.preconfigure_number, 2);
        assert_eq!(cfg.models.language_models_url, "/opt/lm");
    }

    #[test]
    fn zero_threads_rejected() {
        let mut cfg = Config::default();
        cfg.pool.threads = 0;
        assert!(matches!(cfg.validate(), Err(GlossaError::ConfigInvalid { .. })));
    }

    #[test]
    fn preconfiguration_without_language_rejected() {
        let mut cfg = Config::default();
        cfg.pool.preconfigurations.push(RecognitionConfig::default());
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("pool.preconfigurations[0]"));
    }

    #[test]
    fn plan_all_unconfigured_when_disabled() {
        let pool = PoolConfig {
            threads: 3,
            preconfigure: false,
            preconfigure_number: 3,
            preconfigurations: vec![pre("ναι")],
        };
        assert_eq!(pool.preconfiguration_plan(), vec![None, None, None]);
    }

    #[test]
    fn plan_cycles_and_leaves_rest_unconfigured() {
        let pool = PoolConfig {
            threads: 4,
            preconfigure: true,
            preconfigure_number: 3,
            preconfigurations: vec![pre("ναι"), pre("όχι")],
        };
        let plan = pool.preconfiguration_plan();
        assert_eq!(plan.len(), 4);
        assert_eq!(plan[0], Some(pre("ναι")));
        assert_eq!(plan[1], Some(pre("όχι")));
        assert_eq!(plan[2], Some(pre("ναι")));
        assert_eq!(plan[3], None);
    }

    #[test]
    fn plan_truncates_to_thread_count() {
        let pool = PoolConfig {
            threads: 2,
            preconfigure: true,
            preconfigure_number: 5,
            preconfigurations: vec![pre("ένα"), pre("δύο"), pre("τρία")],
        };
        let plan = pool.preconfiguration_plan();
        assert_eq!(plan, vec![Some(pre("ένα")), Some(pre("δύο"))]);
    }

    #[test]
    fn plan_without_preconfigurations_is_unconfigured() {
        let pool = PoolConfig {
            threads: 2,
            preconfigure: true,
            preconfigure_number: 2,
            preconfigurations: vec![],
        };
        assert_eq!(pool.preconfiguration_plan(), vec![None, None]);
    }

    #[test]
    fn generic_greek_configuration_paths() {
        let paths = ModelPaths {
            sphinx_jar_files_url: "/opt/jars/".into(),
            sphinx_jar_file: "sphinx4.jar".into(),
            sphinx_package_url: "/opt/pkg".into(),
            language_models_url: "/opt/lm".into(),
            acoustic_models_url: "/opt/am".into(),
        };
        let sphinx = SphinxConfiguration::generic_greek(&paths);
        assert_eq!(sphinx.jar_path, ".:/opt/jars/sphinx4.jar:/opt/pkg/src");
        assert_eq!(sphinx.configuration_path, "/opt/lm/greekPack/default.config.xml");
        assert_eq!(sphinx.acoustic_model, "/opt/am/acoustic_model/");
        assert_eq!(sphinx.grammar_folder, "/opt/lm/greekPack/");
        assert_eq!(sphinx.dictionary, "/opt/lm/englishPack/cmudict-en-us.dict");
        assert_eq!(sphinx.language_model, "/opt/lm/englishPack/en-us.lm.bin");
        assert!(sphinx.grammar_disabled);
    }
}
