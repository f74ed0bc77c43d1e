//! `glossa transliterate` -- prepare a limited vocabulary for the recognizer.
//!
//! Prints the phoneme dictionary, reverse lookup, englished grammar and
//! sentences as JSON, or with `--dict` just the recognizer dictionary lines.
//!
//! # Examples
//!
//! ```text
//! glossa transliterate καλημέρα ναι όχι
//! glossa transliterate robot ναι --english-dict cmudict-en-us.dict --dict
//! glossa transliterate ναι -g ναι -g όχι -s "όχι"
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use glossa_greek::{CmuDictionary, EnglishPhonemes, NoEnglishPhonemes, TransliterationEngine};
use glossa_types::config::Config;

/// Arguments for the `transliterate` subcommand.
#[derive(Args, Debug)]
pub struct TransliterateArgs {
    /// Vocabulary words (Greek or English).
    pub words: Vec<String>,

    /// Grammar token (repeatable).
    #[arg(short, long = "grammar")]
    pub grammar: Vec<String>,

    /// Sentence for the language model (repeatable).
    #[arg(short, long = "sentence")]
    pub sentence: Vec<String>,

    /// CMU-format English dictionary (overrides `english.dictionary`).
    #[arg(long)]
    pub english_dict: Option<PathBuf>,

    /// Fail if a Greek word has graphemes the rule table does not cover.
    #[arg(long)]
    pub strict: bool,

    /// Print recognizer dictionary lines instead of JSON.
    #[arg(long)]
    pub dict: bool,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Run the subcommand and return what should be printed.
pub fn run(args: &TransliterateArgs, config: &Config) -> anyhow::Result<String> {
    if args.words.is_empty() && args.grammar.is_empty() && args.sentence.is_empty() {
        anyhow::bail!("nothing to transliterate: pass words, --grammar or --sentence");
    }

    let engine = TransliterationEngine::new(english_lookup(args, config)?);
    let out = if args.strict {
        engine.transform_strict(&args.words, &args.grammar, &args.sentence)?
    } else {
        engine.transform(&args.words, &args.grammar, &args.sentence)
    };

    if args.dict {
        Ok(out.phonemes.render())
    } else {
        Ok(serde_json::to_string_pretty(&out)?)
    }
}

fn english_lookup(
    args: &TransliterateArgs,
    config: &Config,
) -> anyhow::Result<Arc<dyn EnglishPhonemes>> {
    let path = args
        .english_dict
        .as_ref()
        .or(config.english.dictionary.as_ref());
    match path {
        Some(path) => Ok(Arc::new(CmuDictionary::load(path)?)),
        None => Ok(Arc::new(NoEnglishPhonemes)),
    }
}
