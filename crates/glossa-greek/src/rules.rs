//! The Greek rewrite-rule table.
//!
//! Rules are grouped into seven [`RuleCategory`] passes that must run in
//! declaration order: later passes assume earlier ones already normalized
//! the text. Each pass is a single left-to-right scan that, at every
//! position, replaces the longest matching grapheme sequence of that
//! category and otherwise copies the grapheme through.
//!
//! Phoneme replacements end with [`PHONEME_DELIMITER`]; replacements that
//! are themselves Greek (the contextual digraphs) are picked up again by
//! the passes that follow.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Separator terminating every phoneme token in rewritten text.
pub const PHONEME_DELIMITER: char = ' ';

/// Graphemes after which "αυ"/"ευ" are pronounced with an unvoiced "φ".
pub const FRICATIVE_TRIGGERS: &[char] = &['π', 'τ', 'κ', 'θ', 'χ', 'σ', 'ξ', 'ψ'];

/// Graphemes after which "αυ"/"ευ" are pronounced with a voiced "β".
pub const VOICED_CONTINUANTS: &[char] = &[
    'δ', 'γ', 'ζ', 'λ', 'ρ', 'μ', 'ν', 'α', 'ά', 'ε', 'έ', 'η', 'ή', 'ι', 'ί', 'ϊ', 'ΐ', 'ο', 'ό',
    'υ', 'ύ', 'ϋ', 'ΰ', 'ω', 'ώ',
];

/// Rule categories in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    CapitalToLower,
    LiteralTransliteration,
    DigraphPhonemes,
    ContextualDigraphs,
    StressedDigraphs,
    SigmaClusters,
    SingleLetterPhonemes,
}

impl RuleCategory {
    /// Every category, in application order.
    pub const ALL: [RuleCategory; 7] = [
        Self::CapitalToLower,
        Self::LiteralTransliteration,
        Self::DigraphPhonemes,
        Self::ContextualDigraphs,
        Self::StressedDigraphs,
        Self::SigmaClusters,
        Self::SingleLetterPhonemes,
    ];

    /// The categories that turn lowercase Greek into phoneme tokens.
    pub const PHONEME_CASCADE: [RuleCategory; 5] = [
        Self::DigraphPhonemes,
        Self::ContextualDigraphs,
        Self::StressedDigraphs,
        Self::SigmaClusters,
        Self::SingleLetterPhonemes,
    ];
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapitalToLower => write!(f, "capital to lower"),
            Self::LiteralTransliteration => write!(f, "literal transliteration"),
            Self::DigraphPhonemes => write!(f, "digraph phonemes"),
            Self::ContextualDigraphs => write!(f, "contextual digraphs"),
            Self::StressedDigraphs => write!(f, "stressed digraphs"),
            Self::SigmaClusters => write!(f, "sigma clusters"),
            Self::SingleLetterPhonemes => write!(f, "single letter phonemes"),
        }
    }
}

/// One rewrite pass: a category's rules plus its longest pattern length.
///
/// The last `lookahead` graphemes of every pattern are context only: they
/// must match, but are neither replaced nor consumed.
#[derive(Debug, Clone)]
pub struct RulePass {
    category: RuleCategory,
    rules: HashMap<String, String>,
    max_len: usize,
    lookahead: usize,
}

impl RulePass {
    /// Build a pass from `(pattern, replacement)` pairs.
    ///
    /// Patterns are counted in chars, not bytes.
    pub fn new<P, R>(category: RuleCategory, rules: impl IntoIterator<Item = (P, R)>) -> Self
    where
        P: Into<String>,
        R: Into<String>,
    {
        let rules: HashMap<String, String> = rules
            .into_iter()
            .map(|(p, r)| (p.into(), r.into()))
            .collect();
        let max_len = rules.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        Self {
            category,
            rules,
            max_len,
            lookahead: 0,
        }
    }

    /// Build a pass whose patterns end in `lookahead` context graphemes.
    pub fn with_lookahead<P, R>(
        category: RuleCategory,
        rules: impl IntoIterator<Item = (P, R)>,
        lookahead: usize,
    ) -> Self
    where
        P: Into<String>,
        R: Into<String>,
    {
        Self {
            lookahead,
            ..Self::new(category, rules)
        }
    }

    pub fn category(&self) -> RuleCategory {
        self.category
    }

    /// Number of rules in this pass.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Replacement for an exact pattern, if the pass has one.
    pub fn get(&self, pattern: &str) -> Option<&str> {
        self.rules.get(pattern).map(String::as_str)
    }

    /// Every pattern of the pass, in no particular order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Rewrite `input` in one left-to-right, longest-match-first scan.
    ///
    /// Context graphemes after a match are scanned again from the next
    /// position.
    pub fn apply(&self, input: &str) -> String {
        let chars: Vec<char> = input.chars().collect();
        let mut out = String::with_capacity(input.len() * 2);
        let mut key = String::with_capacity(self.max_len * 4);
        let mut i = 0;

        'scan: while i < chars.len() {
            let longest = self.max_len.min(chars.len() - i);
            for len in (1..=longest).rev() {
                key.clear();
                key.extend(&chars[i..i + len]);
                if let Some(replacement) = self.rules.get(&key) {
                    out.push_str(replacement);
                    i += len.saturating_sub(self.lookahead).max(1);
                    continue 'scan;
                }
            }
            out.push(chars[i]);
            i += 1;
        }
        out
    }
}

/// The ordered, immutable collection of rule passes.
#[derive(Debug, Clone)]
pub struct RuleTable {
    passes: Vec<RulePass>,
}

static GREEK: LazyLock<RuleTable> = LazyLock::new(RuleTable::build_greek);

impl RuleTable {
    /// The process-wide Greek rule table, built on first use.
    pub fn greek() -> &'static RuleTable {
        &GREEK
    }

    fn build_greek() -> Self {
        let passes = vec![
            RulePass::new(RuleCategory::CapitalToLower, CAPITAL_TO_LOWER.iter().copied()),
            RulePass::new(
                RuleCategory::LiteralTransliteration,
                LITERAL_TRANSLITERATION.iter().copied(),
            ),
            RulePass::new(RuleCategory::DigraphPhonemes, DIGRAPH_PHONEMES.iter().copied()),
            RulePass::with_lookahead(RuleCategory::ContextualDigraphs, contextual_digraphs(), 1),
            RulePass::new(RuleCategory::StressedDigraphs, STRESSED_DIGRAPHS.iter().copied()),
            RulePass::new(RuleCategory::SigmaClusters, SIGMA_CLUSTERS.iter().copied()),
            RulePass::new(
                RuleCategory::SingleLetterPhonemes,
                SINGLE_LETTER_PHONEMES.iter().copied(),
            ),
        ];
        tracing::debug!(
            rules = passes.iter().map(RulePass::len).sum::<usize>(),
            "greek rule table built"
        );
        Self { passes }
    }

    /// All passes in application order.
    pub fn passes(&self) -> &[RulePass] {
        &self.passes
    }

    /// The pass for one category.
    pub fn pass(&self, category: RuleCategory) -> &RulePass {
        // Passes are stored in `RuleCategory::ALL` order.
        let idx = RuleCategory::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or_default();
        &self.passes[idx]
    }

    /// Whether the table maps `c` to lowercase or to a phoneme.
    pub fn covers(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        let s: &str = c.encode_utf8(&mut buf);
        self.pass(RuleCategory::CapitalToLower).get(s).is_some()
            || self.pass(RuleCategory::SingleLetterPhonemes).get(s).is_some()
    }
}

/// Whether `c` lies in the Greek or Greek Extended Unicode blocks.
pub fn is_greek(c: char) -> bool {
    matches!(c, '\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}')
}

// ---- Category 1: uppercase to lowercase ----

const CAPITAL_TO_LOWER: &[(&str, &str)] = &[
    ("Α", "α"), ("Ά", "ά"), ("Β", "β"), ("Γ", "γ"), ("Δ", "δ"), ("Ε", "ε"),
    ("Έ", "έ"), ("Ζ", "ζ"), ("Η", "η"), ("Ή", "ή"), ("Θ", "θ"), ("Ι", "ι"),
    ("Ί", "ί"), ("Ϊ", "ϊ"), ("Κ", "κ"), ("Λ", "λ"), ("Μ", "μ"), ("Ν", "ν"),
    ("Ξ", "ξ"), ("Ο", "ο"), ("Ό", "ό"), ("Π", "π"), ("Ρ", "ρ"), ("Σ", "σ"),
    ("Τ", "τ"), ("Υ", "υ"), ("Ύ", "ύ"), ("Ϋ", "ϋ"), ("Φ", "φ"), ("Χ", "χ"),
    ("Ψ", "ψ"), ("Ω", "ω"), ("Ώ", "ώ"),
];

// ---- Category 2: literal Latin spelling ----

const LITERAL_TRANSLITERATION: &[(&str, &str)] = &[
    ("α", "a"), ("ά", "a'"), ("β", "b"), ("γ", "g"), ("δ", "d"), ("ε", "e"),
    ("έ", "e'"), ("ζ", "z"), ("η", "h"), ("ή", "h'"), ("θ", "th"), ("ι", "i"),
    ("ί", "i'"), ("ϊ", "i:"), ("ΐ", "i':"), ("κ", "k"), ("λ", "l"), ("μ", "m"),
    ("ν", "n"), ("ξ", "ks"), ("ο", "o"), ("ό", "o'"), ("π", "p"), ("ρ", "r"),
    ("σ", "s"), ("ς", "s'"), ("τ", "t"), ("υ", "u"), ("ύ", "u'"), ("ϋ", "u:"),
    ("ΰ", "u':"), ("φ", "f"), ("χ", "x"), ("ψ", "ps"), ("ω", "w"), ("ώ", "w'"),
];

// ---- Category 3: consonant clusters and "ου" ----

const DIGRAPH_PHONEMES: &[(&str, &str)] = &[
    ("ου", "UW "), ("ού", "UW "), ("μπ", "B "), ("ντ", "D "), ("γκ", "G "),
    ("γγ", "G "), ("τσ", "CH "), ("τζ", "JH "), ("σσ", "S "), ("κκ", "K "),
    ("ββ", "V "), ("λλ", "L "), ("μμ", "M "), ("νν", "N "), ("ππ", "P "),
    ("ρρ", "R "), ("ττ", "T "),
];

// ---- Category 4: "αυ"/"ευ" voiced or unvoiced by the next grapheme ----

/// `(digraph, voiced rewrite, unvoiced rewrite)`
const CONTEXTUAL_BASES: &[(&str, &str, &str)] = &[
    ("αυ", "αβ", "αφ"),
    ("αύ", "άβ", "άφ"),
    ("ευ", "εβ", "εφ"),
    ("εύ", "έβ", "έφ"),
];

/// `digraph + next` patterns; `next` is lookahead and is not rewritten.
fn contextual_digraphs() -> Vec<(String, String)> {
    let mut rules = Vec::new();
    for (digraph, voiced, unvoiced) in CONTEXTUAL_BASES {
        for next in FRICATIVE_TRIGGERS {
            rules.push((format!("{digraph}{next}"), unvoiced.to_string()));
        }
        for next in VOICED_CONTINUANTS {
            rules.push((format!("{digraph}{next}"), voiced.to_string()));
        }
    }
    rules
}

// ---- Category 5: vowel digraphs ----

const STRESSED_DIGRAPHS: &[(&str, &str)] = &[
    ("αι", "EH "), ("αί", "EH "), ("ει", "IH "), ("εί", "IH "),
    ("οι", "IH "), ("οί", "IH "), ("υι", "IH "), ("υί", "IH "),
];

// ---- Category 6: sigma voicing assimilation ----

const SIGMA_CLUSTERS: &[(&str, &str)] = &[
    ("σγ", "Z W "), ("σβ", "Z V "), ("σδ", "Z DH "), ("σμ", "Z M "),
    ("σν", "Z N "), ("σλ", "Z L "), ("σρ", "Z R "), ("σμπ", "Z B "),
    ("σντ", "Z D "),
];

// ---- Category 7: single letters ----

const SINGLE_LETTER_PHONEMES: &[(&str, &str)] = &[
    ("α", "AA "), ("ά", "AA "), ("β", "V "), ("γ", "W "), ("δ", "DH "),
    ("ε", "EH "), ("έ", "EH "), ("ζ", "Z "), ("η", "IH "), ("ή", "IH "),
    ("θ", "TH "), ("ι", "IH "), ("ί", "IH "), ("ϊ", "IH "), ("ΐ", "IH "),
    ("κ", "K "), ("λ", "L "), ("μ", "M "), ("ν", "N "), ("ξ", "K S "),
    ("ο", "OW "), ("ό", "OW "), ("π", "P "), ("ρ", "R "), ("σ", "S "),
    ("ς", "S "), ("τ", "T "), ("υ", "IH "), ("ύ", "IH "), ("ϋ", "IH "),
    ("ΰ", "IH "), ("φ", "F "), ("χ", "HH "), ("ψ", "P S "), ("ω", "OW "),
    ("ώ", "OW "),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static RuleTable {
        RuleTable::greek()
    }

    #[test]
    fn passes_are_in_application_order() {
        let order: Vec<RuleCategory> = table().passes().iter().map(RulePass::category).collect();
        assert_eq!(order, RuleCategory::ALL.to_vec());
    }

    #[test]
    fn trigger_sets_are_disjoint() {
        for c in FRICATIVE_TRIGGERS {
            assert!(!VOICED_CONTINUANTS.contains(c), "{c} in both sets");
        }
    }

    #[test]
    fn contextual_pass_has_every_combination() {
        let pass = table().pass(RuleCategory::ContextualDigraphs);
        assert_eq!(
            pass.len(),
            CONTEXTUAL_BASES.len() * (FRICATIVE_TRIGGERS.len() + VOICED_CONTINUANTS.len())
        );
        assert_eq!(pass.get("αυτ"), Some("αφ"));
        assert_eq!(pass.get("εύρ"), Some("έβ"));
        assert_eq!(pass.get("αυϋ"), Some("αβ"));
        assert_eq!(pass.get("αυΰ"), Some("αβ"));
    }

    #[test]
    fn contextual_pass_keeps_the_next_grapheme_as_context() {
        let pass = table().pass(RuleCategory::ContextualDigraphs);
        assert_eq!(pass.apply("αυτ"), "αφτ");
        // The context "α" starts another digraph, which is rewritten too.
        assert_eq!(pass.apply("ευαυτ"), "εβαφτ");
        assert_eq!(pass.apply("ευευρ"), "εβεβρ");
        assert_eq!(pass.apply("ταυ"), "ταυ");
    }

    #[test]
    fn lookahead_pass_always_advances() {
        let pass = RulePass::with_lookahead(RuleCategory::ContextualDigraphs, [("αβ", "X")], 3);
        assert_eq!(pass.apply("αβγ"), "Xβγ");
    }

    #[test]
    fn every_lowercase_literal_letter_has_a_phoneme() {
        let single = table().pass(RuleCategory::SingleLetterPhonemes);
        for (letter, _) in LITERAL_TRANSLITERATION {
            assert!(single.get(letter).is_some(), "{letter} has no phoneme");
        }
    }

    #[test]
    fn patterns_lists_the_literal_inventory() {
        let pass = table().pass(RuleCategory::LiteralTransliteration);
        let mut patterns: Vec<&str> = pass.patterns().collect();
        patterns.sort_unstable();
        let mut expected: Vec<&str> = LITERAL_TRANSLITERATION.iter().map(|(p, _)| *p).collect();
        expected.sort_unstable();
        assert_eq!(patterns, expected);
    }

    #[test]
    fn every_capital_lowers_to_a_covered_letter() {
        let single = table().pass(RuleCategory::SingleLetterPhonemes);
        for (upper, lower) in CAPITAL_TO_LOWER {
            assert!(single.get(lower).is_some(), "{upper} -> {lower} not covered");
        }
    }

    #[test]
    fn capital_upsilon_lowers_to_upsilon() {
        let pass = table().pass(RuleCategory::CapitalToLower);
        assert_eq!(pass.apply("ΥΓΕΙΑ"), "υγεια");
    }

    #[test]
    fn longest_match_wins_within_a_pass() {
        let pass = table().pass(RuleCategory::SigmaClusters);
        assert_eq!(pass.apply("σμπ"), "Z B ");
        assert_eq!(pass.apply("σμα"), "Z M α");
        assert_eq!(pass.apply("σντ"), "Z D ");
    }

    #[test]
    fn unmatched_graphemes_are_copied_through() {
        let pass = table().pass(RuleCategory::DigraphPhonemes);
        assert_eq!(pass.apply("αxμπ7"), "αxB 7");
    }

    #[test]
    fn scan_is_left_to_right_and_non_overlapping() {
        // "γγκ": the leftmost "γγ" is consumed first, leaving "κ".
        let pass = table().pass(RuleCategory::DigraphPhonemes);
        assert_eq!(pass.apply("γγκ"), "G κ");
    }

    #[test]
    fn custom_pass_counts_chars_not_bytes() {
        let pass = RulePass::new(RuleCategory::DigraphPhonemes, [("ωω", "X ")]);
        assert_eq!(pass.apply("ωωω"), "X ω");
    }

    #[test]
    fn empty_pass_is_identity() {
        let pass = RulePass::new(RuleCategory::SigmaClusters, Vec::<(String, String)>::new());
        assert!(pass.is_empty());
        assert_eq!(pass.apply("σμπ"), "σμπ");
    }

    #[test]
    fn coverage_and_greek_block() {
        assert!(table().covers('Ω'));
        assert!(table().covers('ς'));
        assert!(!table().covers('ϐ'));
        assert!(is_greek('ϐ'));
        assert!(is_greek('ἀ'));
        assert!(!is_greek('a'));
    }
}
