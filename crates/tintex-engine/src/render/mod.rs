//! Rendering a single snippet.
//!
//! ```text
//! text → prepare → gobble → tokenize_embedded → MarkupFormatter → post_process → template
//!        (tabs)    (columns)  (escapes)          (\PY tags)        (numbers, ~)   (\tl_set:cn)
//! ```

pub mod embedded;
pub mod escape;
pub mod formatter;
pub mod gobble;
pub mod lines;
pub mod template;

use tintex_syntax::lexer;

use crate::error::RenderError;
use crate::options::OptionSet;
use crate::style::{self, Style};
use embedded::tokenize_embedded;
use formatter::MarkupFormatter;
use lines::{RenderedBlock, post_process};

/// A rendered snippet and the artifact text built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSnippet {
    pub block: RenderedBlock,
    pub artifact: String,
}

/// Resolve the style named by `options`.
pub fn resolve_style(options: &OptionSet) -> Result<&'static Style, RenderError> {
    style::lookup(&options.style).ok_or_else(|| RenderError::UnknownStyle(options.style.clone()))
}

/// Render `text` with `options` into a snippet artifact.
pub fn render(text: &str, options: &OptionSet) -> Result<RenderedSnippet, RenderError> {
    let tokenizer = lexer::lookup(&options.lang)
        .ok_or_else(|| RenderError::UnknownLanguage(options.lang.clone()))?;
    let style = resolve_style(options)?;

    let prepared = lexer::prepare(text, &options.lex_options());
    let source = gobble::gobble(&prepared, options.gobble);
    let tokens = tokenize_embedded(tokenizer, &source, options.escape_inside)?;
    log::debug!(
        "Rendering {} tokens of {} with style {}",
        tokens.len(),
        tokenizer.name(),
        style.name
    );

    let formatted = MarkupFormatter::new(style, options).format(&tokens);
    let block = post_process(formatted.lines(), options.numbering());
    let artifact = template::snippet(&block, options.mode, &options.lineno_sep);

    Ok(RenderedSnippet { block, artifact })
}
