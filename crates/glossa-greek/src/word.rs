//! Input token classification.

use serde::{Deserialize, Serialize};

/// Which input list a token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Word,
    Grammar,
    Sentence,
}

/// Token language, derived from its leading character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Greek,
    English,
}

impl Language {
    /// English iff the token starts with an ASCII letter or `-`.
    pub fn of(token: &str) -> Self {
        match token.chars().next() {
            Some(c) if c.is_ascii_alphabetic() || c == '-' => Self::English,
            _ => Self::Greek,
        }
    }
}

/// A surface token with its role and derived language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry<'a> {
    pub text: &'a str,
    pub role: Role,
    pub language: Language,
}

impl<'a> WordEntry<'a> {
    pub fn new(text: &'a str, role: Role) -> Self {
        Self {
            text,
            role,
            language: Language::of(text),
        }
    }

    /// Classify a list of tokens, dropping blank ones.
    pub fn classify(tokens: &'a [String], role: Role) -> Vec<Self> {
        tokens
            .iter()
            .filter(|t| {
                let keep = !t.trim().is_empty();
                if !keep {
                    tracing::debug!(?role, "skipping blank token");
                }
                keep
            })
            .map(|t| Self::new(t, role))
            .collect()
    }
}

/// Split entries into `(english, greek)` surface texts, preserving order.
pub fn partition<'a>(entries: &[WordEntry<'a>]) -> (Vec<&'a str>, Vec<&'a str>) {
    let mut english = Vec::new();
    let mut greek = Vec::new();
    for entry in entries {
        match entry.language {
            Language::English => english.push(entry.text),
            Language::Greek => greek.push(entry.text),
        }
    }
    (english, greek)
}
