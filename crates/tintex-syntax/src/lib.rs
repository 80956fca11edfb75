//! # tintex-syntax
//!
//! Token classification for code snippets, built on [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → prepare() → Prepared Text → LanguageTokenizer → Tokens
//!               (newlines, tabs)              (Logos lexers)     (SyntaxKind, &str)
//! ```
//!
//! ### 1. Classification ([`syntax_kind`] module)
//!
//! [`SyntaxKind`] is a fixed tree of token classes (`COMMENT` → `COMMENT_SINGLE`,
//! `LITERAL` → `STRING` → `STRING_DOC`, ...). Renderers walk a kind's
//! [`SyntaxKind::chain`] to build style class names.
//!
//! ### 2. Lexing ([`lexer`] module)
//!
//! [`lexer::prepare`] applies lexical settings once per snippet, then a
//! [`LanguageTokenizer`] classifies the prepared text losslessly. Because
//! tokenizing never alters text, any slice of prepared text can be fed back
//! through the same tokenizer.
//!
//! ### 3. Languages ([`languages`] module)
//!
//! Built-in lexers for `text`, `c`, `python` and `tex`, looked up by name or
//! alias through [`lexer::lookup`].
//!
//! ## Quick Start
//!
//! ```
//! use tintex_syntax::{lexer, SyntaxKind};
//!
//! let python = lexer::lookup("python").unwrap();
//! let text = lexer::prepare("x = 1  # one", &lexer::LexOptions::default());
//! let tokens = python.tokenize(&text);
//!
//! assert_eq!(tokens[0].kind, SyntaxKind::NAME);
//! assert!(tokens.iter().any(|t| t.kind == SyntaxKind::COMMENT_SINGLE));
//! ```

pub mod languages;
pub mod lexer;
pub mod syntax_kind;

pub use lexer::{LanguageTokenizer, LexOptions, Token};
pub use syntax_kind::SyntaxKind;
