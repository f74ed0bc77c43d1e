//! `glossa fingerprint` -- configuration fingerprint of a request.
//!
//! Two requests with the same fingerprint can share a configured worker.
//!
//! # Examples
//!
//! ```text
//! glossa fingerprint ναι όχι
//! glossa fingerprint --language en yes no --short
//! ```

use clap::Args;

use glossa_types::{Fingerprint, RecognitionConfig};

/// Arguments for the `fingerprint` subcommand.
#[derive(Args, Debug)]
pub struct FingerprintArgs {
    /// Vocabulary words, in request order.
    pub words: Vec<String>,

    /// Language tag.
    #[arg(short, long, default_value = "el")]
    pub language: String,

    /// Grammar token (repeatable).
    #[arg(short, long = "grammar")]
    pub grammar: Vec<String>,

    /// Sentence (repeatable).
    #[arg(short, long = "sentence")]
    pub sentence: Vec<String>,

    /// Print only the 12-digit prefix.
    #[arg(long)]
    pub short: bool,
}

pub fn run(args: &FingerprintArgs) -> anyhow::Result<String> {
    let config = RecognitionConfig::new(
        args.language.clone(),
        args.words.clone(),
        args.grammar.clone(),
        args.sentence.clone(),
    );
    config.validate()?;
    let fingerprint = Fingerprint::of(&config);
    Ok(if args.short {
        fingerprint.short()
    } else {
        fingerprint.to_hex()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> FingerprintArgs {
        FingerprintArgs {
            words: words.iter().map(|w| w.to_string()).collect(),
            language: "el".into(),
            grammar: Vec::new(),
            sentence: Vec::new(),
            short: false,
        }
    }

    #[test]
    fn order_matters() {
        let ab = run(&args(&["a", "b"])).unwrap();
        let ba = run(&args(&["b", "a"])).unwrap();
        assert_ne!(ab, ba);
        assert_eq!(ab.len(), 64);
    }

    #[test]
    fn short_is_prefix() {
        let full = run(&args(&["ναι"])).unwrap();
        let mut a = args(&["ναι"]);
        a.short = true;
        let short = run(&a).unwrap();
        assert!(full.starts_with(&short));
        assert_eq!(short.len(), 12);
    }

    #[test]
    fn empty_language_is_rejected() {
        let mut a = args(&["ναι"]);
        a.language = String::new();
        assert!(run(&a).is_err());
    }
}
