//! Core extraction and inlining engine.
//!
//! Two independent passes share the call scanner and the plural resolver:
//!
//! 1. **Extraction** (`extract`): walk source roots, find marker calls, build one
//!    translation tree per locale, merge it with the on-disk assets and write
//!    the assets back.
//! 2. **Inlining** (`inline`): rewrite compiled chunks once per locale, replacing
//!    marker calls with literal values looked up from the assets.
//!
//! ## Module Structure
//!
//! - `scanner`: Lightweight call-expression scanner (no full parser)
//! - `tree`: Translation tree operations (deep set/merge, sorting)
//! - `plural`: CLDR plural category resolution
//! - `assets`: Reading and writing per-locale asset files
//! - `file_scanner`: Source file discovery
//! - `extract`: Key extraction pass
//! - `inline`: Inlining pass
//! - `diagnostics`: Counters and log lines produced by both passes

pub mod assets;
pub mod diagnostics;
pub mod extract;
pub mod file_scanner;
pub mod inline;
pub mod plural;
pub mod scanner;
pub mod tree;

pub use diagnostics::{ChunkDiagnostics, ExtractStats, InlineDiagnostics};
pub use tree::Translation;
