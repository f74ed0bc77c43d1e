//! The transliteration engine.
//!
//! [`TransliterationEngine::transform`] turns a limited-vocabulary request
//! (words, grammar, sentences, possibly mixing Greek and English) into what
//! the recognizer consumes: a phoneme dictionary keyed by englished words,
//! englished grammar and sentences, and a map back to the original words.

use std::sync::Arc;

use serde::Serialize;

use glossa_types::{GlossaError, Result};

use crate::dictionary::{PhonemeDictionary, ReverseLookup};
use crate::english::{EnglishPhonemes, NoEnglishPhonemes};
use crate::rules::{is_greek, RuleCategory, RuleTable, PHONEME_DELIMITER};
use crate::word::{partition, Language, Role, WordEntry};

/// Result of [`TransliterationEngine::transform`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transliteration {
    /// English phonemes overlaid with Greek phonemes.
    pub phonemes: PhonemeDictionary,
    /// Englished (or English) word -> original word.
    pub reverse: ReverseLookup,
    /// English grammar followed by englished Greek grammar.
    pub grammar: Vec<String>,
    /// Englished Greek sentences followed by English sentences.
    pub sentences: Vec<String>,
}

/// Greek/English vocabulary preparation.
///
/// Stateless apart from the immutable rule table and the English lookup,
/// so one engine can be shared across threads.
#[derive(Clone)]
pub struct TransliterationEngine {
    table: &'static RuleTable,
    english: Arc<dyn EnglishPhonemes>,
}

impl TransliterationEngine {
    /// Engine using `english` for Latin-script words.
    pub fn new(english: Arc<dyn EnglishPhonemes>) -> Self {
        Self {
            table: RuleTable::greek(),
            english,
        }
    }

    /// Engine with no English pronunciations.
    pub fn greek_only() -> Self {
        Self::new(Arc::new(NoEnglishPhonemes))
    }

    pub fn table(&self) -> &'static RuleTable {
        self.table
    }

    /// Map Greek capitals to lowercase. Idempotent.
    pub fn lowercase(&self, word: &str) -> String {
        self.table.pass(RuleCategory::CapitalToLower).apply(word)
    }

    /// The englished spelling of `word`, used as the downstream key.
    pub fn englify(&self, word: &str) -> String {
        let lower = self.lowercase(word);
        self.table
            .pass(RuleCategory::LiteralTransliteration)
            .apply(&lower)
    }

    /// Phoneme tokens for a Greek word.
    ///
    /// Graphemes outside the table survive as literal text inside the
    /// token they end up adjacent to.
    pub fn phonemes(&self, word: &str) -> Vec<String> {
        let text = self.phoneme_text(&self.lowercase(word));
        split_phonemes(&text)
    }

    /// Greek graphemes the cascade leaves untranslated in `word`.
    pub fn untranslated(&self, word: &str) -> Vec<char> {
        greek_chars(&self.phoneme_text(&self.lowercase(word)))
    }

    fn phoneme_text(&self, lower: &str) -> String {
        let mut text = lower.to_string();
        for category in RuleCategory::PHONEME_CASCADE {
            text = self.table.pass(category).apply(&text);
            tracing::trace!(%category, text = %text, "rule pass applied");
        }
        text
    }

    /// Phonemes and reverse entries for Greek words.
    pub fn transform_greek(&self, words: &[&str]) -> (PhonemeDictionary, ReverseLookup) {
        let mut dictionary = PhonemeDictionary::new();
        let mut reverse = ReverseLookup::new();
        for &word in words {
            let englished = self.englify(word);
            let phonemes = self.phonemes(word);
            tracing::debug!(word, englished = %englished, ?phonemes, "greek word transliterated");

            if let Some(previous) = reverse.insert(englished.clone(), word.to_string())
                && previous != word
            {
                tracing::debug!(
                    englished = %englished,
                    previous = %previous,
                    word,
                    "englished key collision, keeping the last word"
                );
            }
            dictionary.insert(englished, phonemes);
        }
        (dictionary, reverse)
    }

    /// Englished spelling of every token.
    pub fn englify_all(&self, tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| self.englify(t)).collect()
    }

    /// Prepare a mixed Greek/English vocabulary. Never fails; uncovered
    /// graphemes pass through (see [`Self::transform_strict`]).
    pub fn transform(
        &self,
        words: &[String],
        grammar: &[String],
        sentences: &[String],
    ) -> Transliteration {
        let word_entries = WordEntry::classify(words, Role::Word);
        let grammar_entries = WordEntry::classify(grammar, Role::Grammar);
        let sentence_entries = WordEntry::classify(sentences, Role::Sentence);

        let (english_words, greek_words) = partition(&word_entries);
        let (english_grammar, greek_grammar) = partition(&grammar_entries);
        let (english_sentences, greek_sentences) = partition(&sentence_entries);

        // English entries go in first so Greek wins a shared key in both maps.
        let (greek_phonemes, greek_reverse) = self.transform_greek(&greek_words);
        let mut reverse: ReverseLookup = english_words
            .iter()
            .map(|w| (w.to_string(), w.to_string()))
            .collect();
        reverse.extend(greek_reverse);

        let mut phonemes: PhonemeDictionary =
            self.english.phonemes(&english_words).into_iter().collect();
        phonemes.extend(greek_phonemes);

        let mut final_grammar: Vec<String> =
            english_grammar.iter().map(|s| s.to_string()).collect();
        final_grammar.extend(self.englify_all(&greek_grammar));

        let mut final_sentences = self.englify_all(&greek_sentences);
        final_sentences.extend(english_sentences.iter().map(|s| s.to_string()));

        tracing::debug!(
            greek = greek_words.len(),
            english = english_words.len(),
            dictionary = phonemes.len(),
            "vocabulary transformed"
        );

        Transliteration {
            phonemes,
            reverse,
            grammar: final_grammar,
            sentences: final_sentences,
        }
    }

    /// Like [`Self::transform`], but rejects Greek tokens with graphemes the
    /// rule table does not cover.
    ///
    /// Words must survive both the englishing and the phoneme cascade;
    /// grammar and sentence tokens only the englishing.
    pub fn transform_strict(
        &self,
        words: &[String],
        grammar: &[String],
        sentences: &[String],
    ) -> Result<Transliteration> {
        let entries = WordEntry::classify(words, Role::Word)
            .into_iter()
            .chain(WordEntry::classify(grammar, Role::Grammar))
            .chain(WordEntry::classify(sentences, Role::Sentence));
        for entry in entries {
            if entry.language != Language::Greek {
                continue;
            }
            let mut graphemes = greek_chars(&self.englify(entry.text));
            if entry.role == Role::Word {
                for c in self.untranslated(entry.text) {
                    if !graphemes.contains(&c) {
                        graphemes.push(c);
                    }
                }
            }
            if !graphemes.is_empty() {
                return Err(GlossaError::TransliterationGap {
                    word: entry.text.to_string(),
                    graphemes,
                });
            }
        }
        Ok(self.transform(words, grammar, sentences))
    }
}

impl Default for TransliterationEngine {
    fn default() -> Self {
        Self::greek_only()
    }
}

impl std::fmt::Debug for TransliterationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransliterationEngine")
            .field("passes", &self.table.passes().len())
            .finish_non_exhaustive()
    }
}

/// Distinct Greek-block characters of `text`, in first-seen order.
fn greek_chars(text: &str) -> Vec<char> {
    let mut found: Vec<char> = Vec::new();
    for c in text.chars().filter(|c| is_greek(*c)) {
        if !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

/// Split delimited phoneme text, dropping the empty segment after the
/// final delimiter.
fn split_phonemes(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = text.split(PHONEME_DELIMITER).map(String::from).collect();
    if tokens.last().is_some_and(String::is_empty) {
        tokens.pop();
    }
    tokens
}
