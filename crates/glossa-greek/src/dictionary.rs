//! Phoneme dictionary and reverse lookup.
//!
//! Both maps use last-write-wins on key collision: two Greek words that
//! share an englished spelling keep whichever was processed last.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Englished word -> original surface word.
pub type ReverseLookup = BTreeMap<String, String>;

/// Englished word -> ordered phoneme tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhonemeDictionary(BTreeMap<String, Vec<String>>);

impl PhonemeDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert, returning the sequence it replaced.
    pub fn insert(&mut self, word: impl Into<String>, phonemes: Vec<String>) -> Option<Vec<String>> {
        self.0.insert(word.into(), phonemes)
    }

    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.0.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Overlay `other` on top of `self`; `other` wins on collision.
    pub fn extend(&mut self, other: PhonemeDictionary) {
        self.0.extend(other.0);
    }

    /// Render as recognizer dictionary lines: `word PH PH ...`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (word, phonemes) in &self.0 {
            out.push_str(word);
            for ph in phonemes {
                out.push(' ');
                out.push_str(ph);
            }
            out.push('\n');
        }
        out
    }
}

impl FromIterator<(String, Vec<String>)> for PhonemeDictionary {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
