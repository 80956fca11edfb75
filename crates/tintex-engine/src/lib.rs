//! # tintex-engine
//!
//! Turns code blocks embedded in an intermediate TeX document into colored,
//! optionally numbered macro definitions.
//!
//! ```text
//! document ─ Extractor ─> RawBlock ─ OptionSet ─> render() ─> artifact ─ ContentCache ─> output
//!            (markers)               (baseline ⊕ block)       (\tl_set:cn)  (sha256 keyed)
//! ```
//!
//! - [`extract`] finds `<TAG@kind@N ... >TAG@kind@N` blocks.
//! - [`options`] layers each block's option string over the document defaults.
//! - [`render`] tokenizes with escapes, formats tagged markup and numbers lines.
//! - [`style`] provides the `\PY` macro definitions for a color style.
//! - [`cache`] stores artifacts by content digest.
//! - [`convert`] ties these together for whole documents and single snippets.

pub mod cache;
pub mod convert;
pub mod error;
pub mod extract;
pub mod io;
pub mod options;
pub mod render;
pub mod style;

#[cfg(test)]
pub mod tests;

pub use cache::{CachedArtifact, ContentCache, Digest};
pub use convert::{ConversionReport, Converter, SnippetOutcome};
pub use error::{Diagnostic, RenderError};
pub use extract::{BlockKind, DEFAULT_TAG, Extractor, RawBlock};
pub use options::{EscapePair, OptionSet, OutputMode};
pub use render::{RenderedSnippet, render};
