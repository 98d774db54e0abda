//! Tolk - translation key extraction and build-time inlining
//!
//! Tolk finds translation marker calls (`$translate`, `$inlineTranslate`,
//! `$plural` and the function returned by `useTranslate$()`) in JavaScript
//! and TypeScript sources. It keeps per-locale JSON assets in sync with the
//! keys it finds, and rewrites compiled chunks so every call becomes the
//! literal translated value, producing one copy of each chunk per locale.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, printing, exit status)
//! - `config`: Configuration file loading and validation
//! - `core`: Extraction and inlining engine, usable without the CLI

pub mod cli;
pub mod config;
pub mod core;
