//! English pronunciation lookup.
//!
//! English tokens in a Greek request bypass transliteration and are looked
//! up through an [`EnglishPhonemes`] implementation. [`CmuDictionary`]
//! reads the CMU pronouncing dictionary format used by the recognizer:
//!
//! ```text
//! ;;; comment
//! hello HH AH0 L OW1
//! hello(2) HH EH0 L OW1
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use glossa_types::Result;

/// Looks up phonemes for words that are already in Latin script.
pub trait EnglishPhonemes: Send + Sync {
    /// Phonemes for each word that has a known pronunciation.
    ///
    /// Words without one are omitted from the result.
    fn phonemes(&self, words: &[&str]) -> BTreeMap<String, Vec<String>>;
}

/// Lookup that knows no words. Used when no dictionary is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnglishPhonemes;

impl EnglishPhonemes for NoEnglishPhonemes {
    fn phonemes(&self, words: &[&str]) -> BTreeMap<String, Vec<String>> {
        if !words.is_empty() {
            tracing::warn!(
                count = words.len(),
                "no English dictionary configured, English words have no pronunciation"
            );
        }
        BTreeMap::new()
    }
}

/// In-memory CMU-format pronouncing dictionary.
#[derive(Debug, Clone, Default)]
pub struct CmuDictionary {
    entries: HashMap<String, Vec<String>>,
}

impl CmuDictionary {
    /// Read and parse a dictionary file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let dict = Self::parse(&text);
        tracing::info!(path = %path.display(), entries = dict.len(), "loaded English dictionary");
        Ok(dict)
    }

    /// Parse dictionary text. Malformed lines are skipped.
    ///
    /// Keys are lowercased. Only the first pronunciation of a word is kept;
    /// `word(2)` style alternates are ignored.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            if word.ends_with(')') && word.contains('(') {
                continue;
            }
            let phonemes: Vec<String> = fields.map(String::from).collect();
            if phonemes.is_empty() {
                continue;
            }
            entries.entry(word.to_lowercase()).or_insert(phonemes);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive lookup of one word.
    pub fn lookup(&self, word: &str) -> Option<&[String]> {
        self.entries.get(&word.to_lowercase()).map(Vec::as_slice)
    }
}

impl EnglishPhonemes for CmuDictionary {
    fn phonemes(&self, words: &[&str]) -> BTreeMap<String, Vec<String>> {
        let mut found = BTreeMap::new();
        for &word in words {
            match self.lookup(word) {
                Some(phonemes) => {
                    found.insert(word.to_string(), phonemes.to_vec());
                }
                None => tracing::warn!(word, "word not in English dictionary"),
            }
        }
        found
    }
}
