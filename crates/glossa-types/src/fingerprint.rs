//! Request fingerprints.
//!
//! A [`Fingerprint`] is a SHA-256 digest over a [`RecognitionConfig`]:
//! the language tag, then every word, grammar token and sentence in order.
//! Each token is framed by its byte length and each section by its token
//! count, so `["a", "b"]`, `["b", "a"]` and `["ab"]` all hash differently.

use std::fmt;

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::request::RecognitionConfig;

/// Content hash identifying interchangeable configuration requirements.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Compute the fingerprint of a recognition configuration.
    pub fn of(config: &RecognitionConfig) -> Self {
        let mut hasher = Sha256::new();
        update_token(&mut hasher, &config.language);
        for section in [&config.words, &config.grammar, &config.sentences] {
            hasher.update((section.len() as u64).to_le_bytes());
            for token in section {
                update_token(&mut hasher, token);
            }
        }
        let result = hasher.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&result);
        Self(digest)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hexadecimal digest.
    pub fn to_hex(&self) -> String {
        self.0.iter().fold(String::with_capacity(64), |mut acc, b| {
            use std::fmt::Write;
            let _ = write!(acc, "{b:02x}");
            acc
        })
    }

    /// The first 12 hex digits, for log lines.
    pub fn short(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(12);
        hex
    }
}

fn update_token(hasher: &mut Sha256, token: &str) {
    hasher.update((token.len() as u64).to_le_bytes());
    hasher.update(token.as_bytes());
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(lang: &str, words: &[&str], grammar: &[&str], sentences: &[&str]) -> RecognitionConfig {
        let own = |v: &[&str]| -> Vec<String> { v.iter().map(|s| s.to_string()).collect() };
        RecognitionConfig::new(lang, own(words), own(grammar), own(sentences))
    }

    #[test]
    fn identical_inputs_hash_identically() {
        let a = Fingerprint::of(&cfg("el", &["ναι", "όχι"], &[], &["ναι"]));
        let b = Fingerprint::of(&cfg("el", &["ναι", "όχι"], &[], &["ναι"]));
        assert_eq!(a, b);
    }

    #[test]
    fn word_order_matters() {
        let a = Fingerprint::of(&cfg("el", &["a", "b"], &[], &[]));
        let b = Fingerprint::of(&cfg("el", &["b", "a"], &[], &[]));
        assert_ne!(a, b);
    }

    #[test]
    fn token_boundaries_matter() {
        let a = Fingerprint::of(&cfg("el", &["a", "b"], &[], &[]));
        let b = Fingerprint::of(&cfg("el", &["ab"], &[], &[]));
        assert_ne!(a, b);
    }

    #[test]
    fn section_boundaries_matter() {
        let a = Fingerprint::of(&cfg("el", &["a"], &[], &[]));
        let b = Fingerprint::of(&cfg("el", &[], &["a"], &[]));
        let c = Fingerprint::of(&cfg("el", &[], &[], &["a"]));
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn language_matters() {
        let a = Fingerprint::of(&cfg("el", &["yes"], &[], &[]));
        let b = Fingerprint::of(&cfg("en", &["yes"], &[], &[]));
        assert_ne!(a, b);
    }

    #[test]
    fn hex_is_64_lowercase_digits() {
        let hex = Fingerprint::of(&cfg("el", &[], &[], &[])).to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn serializes_as_hex_string() {
        let fp = Fingerprint::of(&cfg("en", &["hello"], &[], &[]));
        let json = serde_json::to_value(fp).unwrap();
        assert_eq!(json, serde_json::Value::String(fp.to_hex()));
    }

    #[test]
    fn short_form_is_prefix() {
        let fp = Fingerprint::of(&cfg("en", &["hello"], &[], &[]));
        assert!(fp.to_hex().starts_with(&fp.short()));
        assert_eq!(fp.short().len(), 12);
    }
}
