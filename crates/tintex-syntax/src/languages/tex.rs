use logos::{Lexer, Logos};

use super::raw_tokens;
use crate::lexer::{LanguageTokenizer, Token};
use crate::syntax_kind::SyntaxKind;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum TexToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"%[^\n]*")]
    Comment,

    #[regex(r"\\[A-Za-z@]+")]
    Command,

    #[regex(r"\\[^A-Za-z@]")]
    Symbol,

    #[token("$", math)]
    Math,

    #[regex(r"[{}]")]
    Group,

    #[regex(r"[&_^#~]")]
    Special,

    #[regex(r"[^\\{}$&_^#~%\s]+")]
    Text,
}

/// `$...$` or `$$...$$`; an unmatched dollar is an error.
fn math(lex: &mut Lexer<'_, TexToken>) -> bool {
    let remainder = lex.remainder();
    let (skip, closer) = if remainder.starts_with('$') {
        (1, "$$")
    } else {
        (0, "$")
    };
    match remainder[skip..].find(closer) {
        Some(end) => {
            lex.bump(skip + end + closer.len());
            true
        }
        None => false,
    }
}

/// TeX / LaTeX lexer.
pub struct TexLexer;

impl LanguageTokenizer for TexLexer {
    fn name(&self) -> &'static str {
        "tex"
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        raw_tokens::<TexToken>(text)
            .into_iter()
            .map(|(token, slice)| {
                let kind = match token {
                    None => SyntaxKind::ERROR,
                    Some(TexToken::Whitespace) => SyntaxKind::WHITESPACE,
                    Some(TexToken::Comment) => SyntaxKind::COMMENT,
                    Some(TexToken::Command | TexToken::Symbol) => SyntaxKind::KEYWORD,
                    Some(TexToken::Math) => SyntaxKind::STRING,
                    Some(TexToken::Group | TexToken::Special) => SyntaxKind::NAME_BUILTIN,
                    Some(TexToken::Text) => SyntaxKind::TEXT,
                };
                Token::new(kind, slice)
            })
            .collect()
    }
}
