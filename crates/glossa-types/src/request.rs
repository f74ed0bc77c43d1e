//! Recognition request and outcome types.
//!
//! A [`RecognitionRequest`] arrives already deserialized from the service
//! layer. Its [`RecognitionConfig`] part decides which backend configuration
//! is needed; the rest (audio location) is payload the backend consumes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GlossaError, Result};

/// The configuration-relevant part of a request.
///
/// Two requests with equal `RecognitionConfig` values can be served by the
/// same configured backend worker without reconfiguration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Language tag, e.g. `"el"` or `"en"`.
    pub language: String,

    /// Limited vocabulary.
    #[serde(default)]
    pub words: Vec<String>,

    /// Grammar tokens. Empty means grammar is disabled.
    #[serde(default)]
    pub grammar: Vec<String>,

    /// Sentences used to build the language model.
    #[serde(default)]
    pub sentences: Vec<String>,
}

impl RecognitionConfig {
    /// Create a config for `language` with the given token lists.
    pub fn new(
        language: impl Into<String>,
        words: Vec<String>,
        grammar: Vec<String>,
        sentences: Vec<String>,
    ) -> Self {
        Self {
            language: language.into(),
            words,
            grammar,
            sentences,
        }
    }

    /// Reject configurations that cannot be fingerprinted meaningfully.
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(GlossaError::config("recognition request has no language"));
        }
        Ok(())
    }
}

/// A full recognition request: configuration plus audio payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionRequest {
    /// Configuration the backend must hold to serve this request.
    #[serde(flatten)]
    pub config: RecognitionConfig,

    /// Path of the audio file to recognize.
    #[serde(default, alias = "path")]
    pub audio_file: PathBuf,

    /// Capture device the audio came from (e.g. `"nao_wav_1_ch"`).
    #[serde(default, alias = "audioSource")]
    pub audio_source: String,
}

impl RecognitionRequest {
    /// Build a request from a configuration and an audio file.
    pub fn new(config: RecognitionConfig, audio_file: impl Into<PathBuf>) -> Self {
        Self {
            config,
            audio_file: audio_file.into(),
            audio_source: String::new(),
        }
    }
}

/// What a backend returns for a successful batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionOutcome {
    /// Recognized words in utterance order.
    pub words: Vec<String>,
}
