//! # glossa-types
//!
//! Core type definitions shared by every glossa crate.
//!
//! This crate sits at the bottom of the dependency graph. It contains:
//!
//! - **[`error`]** -- [`GlossaError`] and the crate-wide [`Result`] alias
//! - **[`config`]** -- Configuration schema (pool, model paths, English lookup)
//! - **[`loader`]** -- Config file discovery and loading
//! - **[`request`]** -- Recognition requests and outcomes
//! - **[`fingerprint`]** -- Content hash identifying interchangeable configurations

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod loader;
pub mod request;

pub use error::{GlossaError, Result};
pub use fingerprint::Fingerprint;
pub use request::{RecognitionConfig, RecognitionOutcome, RecognitionRequest};
