//! Error types for glossa.
//!
//! [`GlossaError`] is non-exhaustive so new failure modes can be added
//! without breaking downstream matches.

use thiserror::Error;

/// Top-level error type for glossa.
///
/// Variants are grouped into recoverable (the request may succeed against
/// another worker or with different input) and fatal (configuration, I/O)
/// categories.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GlossaError {
    // ── Recoverable ──────────────────────────────────────────────────

    /// The recognition backend failed to configure itself or to execute
    /// a batch. The message is the backend's own, passed through verbatim.
    #[error("backend error: {message}")]
    Backend {
        /// Backend-supplied error message.
        message: String,
    },

    /// A word still contains graphemes the rule table does not cover.
    ///
    /// Only produced by the strict transliteration entry point.
    #[error("untranslated graphemes {graphemes:?} in word {word:?}")]
    TransliterationGap {
        /// The original surface word.
        word: String,
        /// The graphemes left behind by the rule cascade.
        graphemes: Vec<char>,
    },

    // ── Fatal ────────────────────────────────────────────────────────

    /// Configuration is missing, malformed or semantically invalid.
    #[error("invalid config: {reason}")]
    ConfigInvalid {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl GlossaError {
    /// Shorthand for [`GlossaError::ConfigInvalid`].
    pub fn config(reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`GlossaError::Backend`].
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// A convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, GlossaError>;
