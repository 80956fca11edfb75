//! # Lexer - Classifying Source Text
//!
//! Every language lexer implements [`LanguageTokenizer`]. The contract is the
//! same for all of them: **every byte in the input appears in exactly one
//! token**, so concatenating the token texts gives back the input.
//!
//! ```
//! use tintex_syntax::lexer::lookup;
//!
//! let lexer = lookup("c").unwrap();
//! let input = "int x = 1; /* one */\n";
//! let tokens = lexer.tokenize(input);
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! Lexing is split in two steps. [`prepare`] applies the lexical settings
//! (line ending normalization, tab expansion, trailing newline) once for the
//! whole snippet; [`LanguageTokenizer::tokenize`] then classifies text without
//! touching it, which lets callers re-tokenize any slice of prepared text.

use crate::languages;
use crate::syntax_kind::SyntaxKind;

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: SyntaxKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// A lexer for one language.
pub trait LanguageTokenizer: Sync {
    /// Canonical language name.
    fn name(&self) -> &'static str;

    /// Classify `text` into tokens without altering it.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>>;
}

/// Lexical settings applied before tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexOptions {
    /// Expand tabs to this many columns; 0 leaves tabs alone.
    pub tab_size: usize,
}

/// Resolve a language identifier or alias, ignoring case.
pub fn lookup(lang: &str) -> Option<&'static dyn LanguageTokenizer> {
    languages::lookup(lang)
}

/// Apply lexical settings to raw source text.
///
/// Line endings become `\n`, leading and trailing blank lines are dropped,
/// tabs are expanded when `tab_size` is positive and the result always ends
/// with a newline.
pub fn prepare(text: &str, options: &LexOptions) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed = normalized.trim_matches('\n');

    let mut prepared = if options.tab_size > 0 {
        expand_tabs(trimmed, options.tab_size)
    } else {
        trimmed.to_string()
    };

    if !prepared.ends_with('\n') {
        prepared.push('\n');
    }
    prepared
}

/// Replace each tab with spaces up to the next multiple of `tab_size` columns.
pub fn expand_tabs(text: &str, tab_size: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0usize;

    for ch in text.chars() {
        match ch {
            '\t' => {
                let width = tab_size - column % tab_size;
                out.extend(std::iter::repeat_n(' ', width));
                column += width;
            }
            '\n' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }

    out
}
