//! `glossa` -- CLI for Greek speech-recognition vocabulary preparation.
//!
//! Provides the following subcommands:
//!
//! - `glossa transliterate` -- Turn Greek/English words into recognizer input.
//! - `glossa fingerprint` -- Show the configuration fingerprint of a request.
//! - `glossa config` -- Show resolved configuration or the generic Greek setup.
//! - `glossa stress` -- Exercise the worker pool with a simulated backend.

use clap::{Parser, Subcommand};

mod commands;

/// Greek speech-recognition vocabulary and worker pool tooling.
#[derive(Parser)]
#[command(
    name = "glossa",
    about = "Greek speech-recognition vocabulary and worker pool tooling",
    version
)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Transliterate a limited vocabulary into phonemes and englished keys.
    Transliterate(commands::transliterate::TransliterateArgs),

    /// Print the configuration fingerprint of a request.
    Fingerprint(commands::fingerprint::FingerprintArgs),

    /// Show resolved configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },

    /// Run many concurrent requests through a simulated worker pool.
    Stress(commands::stress::StressArgs),
}

/// Subcommands for `glossa config`.
#[derive(Subcommand)]
enum ConfigCmd {
    /// Show the full resolved configuration.
    Show {
        /// Config file path (overrides auto-discovery).
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Show the generic Greek recognizer configuration.
    Sphinx {
        /// Config file path (overrides auto-discovery).
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Transliterate(args) => {
            let cfg = commands::load_config(args.config.as_deref())?;
            let out = commands::transliterate::run(&args, &cfg)?;
            print!("{out}");
            if !args.dict {
                println!();
            }
        }
        Commands::Fingerprint(args) => {
            println!("{}", commands::fingerprint::run(&args)?);
        }
        Commands::Config { action } => match action {
            ConfigCmd::Show { config } => {
                let cfg = commands::load_config(config.as_deref())?;
                println!("{}", commands::config_cmd::config_show(&cfg)?);
            }
            ConfigCmd::Sphinx { config } => {
                let cfg = commands::load_config(config.as_deref())?;
                println!("{}", commands::config_cmd::config_sphinx(&cfg)?);
            }
        },
        Commands::Stress(args) => {
            let cfg = commands::load_config(args.config.as_deref())?;
            let report = commands::stress::run(&args, &cfg)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_without_error() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_has_all_subcommands() {
        let cmd = Cli::command();
        let sub_names: Vec<&str> = cmd.get_subcommands().map(|s| s.get_name()).collect();
        for name in ["transliterate", "fingerprint", "config", "stress"] {
            assert!(sub_names.contains(&name), "missing subcommand {name}");
        }
    }

    #[test]
    fn cli_verbose_flag_is_global() {
        let cli = Cli::try_parse_from(["glossa", "--verbose", "fingerprint", "ναι"]).unwrap();
        assert!(cli.verbose);
        let cli = Cli::try_parse_from(["glossa", "fingerprint", "ναι", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn cli_transliterate_repeatable_flags() {
        let cli = Cli::try_parse_from([
            "glossa", "transliterate", "ναι", "όχι", "-g", "ναι", "-g", "όχι", "--sentence", "ναι όχι",
            "--strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Transliterate(args) => {
                assert_eq!(args.words, vec!["ναι", "όχι"]);
                assert_eq!(args.grammar.len(), 2);
                assert_eq!(args.sentence, vec!["ναι όχι"]);
                assert!(args.strict);
            }
            _ => panic!("expected transliterate"),
        }
    }

    #[test]
    fn cli_config_subcommands_parse() {
        assert!(Cli::try_parse_from(["glossa", "config", "show"]).is_ok());
        assert!(
            Cli::try_parse_from(["glossa", "config", "sphinx", "--config", "/tmp/g.toml"]).is_ok()
        );
    }

    #[test]
    fn cli_stress_defaults() {
        let cli = Cli::try_parse_from(["glossa", "stress"]).unwrap();
        match cli.command {
            Commands::Stress(args) => {
                assert_eq!(args.callers, 8);
                assert_eq!(args.requests, 200);
                assert_eq!(args.workers, None);
            }
            _ => panic!("expected stress"),
        }
    }
}
