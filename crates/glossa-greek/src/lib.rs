//! Greek vocabulary preparation for limited-vocabulary speech recognition.
//!
//! The recognizer only understands Latin-script dictionary keys and its own
//! phoneme set. This crate rewrites Greek words into both:
//!
//! | Step | Output |
//! |------|--------|
//! | [`RuleCategory::CapitalToLower`] | lowercase Greek |
//! | [`RuleCategory::LiteralTransliteration`] | englished key (`καλημέρα` -> `kalhme'ra`) |
//! | [`RuleCategory::PHONEME_CASCADE`] (five passes) | phonemes (`K AA L IH M EH R AA`) |
//!
//! English words in the same request are looked up through an
//! [`EnglishPhonemes`] implementation instead.
//!
//! ```
//! use glossa_greek::TransliterationEngine;
//!
//! let engine = TransliterationEngine::greek_only();
//! let out = engine.transform(&["καλημέρα".to_string()], &[], &[]);
//! assert_eq!(out.reverse["kalhme'ra"], "καλημέρα");
//! ```

pub mod dictionary;
pub mod engine;
pub mod english;
pub mod rules;
pub mod word;

pub use dictionary::{PhonemeDictionary, ReverseLookup};
pub use engine::{Transliteration, TransliterationEngine};
pub use english::{CmuDictionary, EnglishPhonemes, NoEnglishPhonemes};
pub use rules::{RuleCategory, RulePass, RuleTable};
pub use word::{Language, Role, WordEntry};
