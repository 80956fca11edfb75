use logos::{Lexer, Logos};

use super::raw_tokens;
use crate::lexer::{LanguageTokenizer, Token};
use crate::syntax_kind::SyntaxKind;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum CToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"#[^\n]*")]
    Preproc,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    Char,

    #[regex(r"[0-9][0-9A-Za-z_.]*")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[-+*/%=<>!&|^~?:]")]
    Operator,

    #[regex(r"[(){}\[\];,.]")]
    Punct,
}

/// An unterminated block comment runs to the end of the input.
fn block_comment(lex: &mut Lexer<'_, CToken>) -> bool {
    let len = match lex.remainder().find("*/") {
        Some(end) => end + 2,
        None => lex.remainder().len(),
    };
    lex.bump(len);
    true
}

const KEYWORDS: &[&str] = &[
    "auto", "break", "case", "const", "continue", "default", "do", "else", "enum", "extern",
    "for", "goto", "if", "inline", "register", "restrict", "return", "sizeof", "static",
    "struct", "switch", "typedef", "union", "volatile", "while",
];

const TYPES: &[&str] = &[
    "bool", "char", "double", "float", "int", "long", "short", "signed", "unsigned", "void",
    "size_t", "ssize_t", "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t",
    "uint32_t", "uint64_t",
];

const CONSTANTS: &[&str] = &["NULL", "true", "false"];

/// C lexer.
pub struct CLexer;

impl LanguageTokenizer for CLexer {
    fn name(&self) -> &'static str {
        "c"
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let raw = raw_tokens::<CToken>(text);
        let mut tokens = Vec::with_capacity(raw.len());

        for (index, &(token, slice)) in raw.iter().enumerate() {
            let kind = match token {
                None => SyntaxKind::ERROR,
                Some(CToken::Whitespace) => SyntaxKind::WHITESPACE,
                Some(CToken::LineComment) => SyntaxKind::COMMENT_SINGLE,
                Some(CToken::BlockComment) => SyntaxKind::COMMENT_MULTILINE,
                Some(CToken::Preproc) => SyntaxKind::COMMENT_PREPROC,
                Some(CToken::Str) => SyntaxKind::STRING,
                Some(CToken::Char) => SyntaxKind::STRING_CHAR,
                Some(CToken::Number) => SyntaxKind::NUMBER,
                Some(CToken::Operator) => SyntaxKind::OPERATOR,
                Some(CToken::Punct) => SyntaxKind::PUNCTUATION,
                Some(CToken::Ident) => classify_ident(slice, next_significant(&raw, index)),
            };
            tokens.push(Token::new(kind, slice));
        }

        tokens
    }
}

fn classify_ident(ident: &str, next: Option<&str>) -> SyntaxKind {
    if KEYWORDS.contains(&ident) {
        SyntaxKind::KEYWORD
    } else if TYPES.contains(&ident) {
        SyntaxKind::KEYWORD_TYPE
    } else if CONSTANTS.contains(&ident) {
        SyntaxKind::KEYWORD_CONSTANT
    } else if next == Some("(") {
        SyntaxKind::NAME_FUNCTION
    } else {
        SyntaxKind::NAME
    }
}

fn next_significant<'a>(raw: &[(Option<CToken>, &'a str)], index: usize) -> Option<&'a str> {
    raw[index + 1..]
        .iter()
        .find(|(token, _)| *token != Some(CToken::Whitespace))
        .map(|(_, slice)| *slice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<(SyntaxKind, &str)> {
        CLexer
            .tokenize(input)
            .into_iter()
            .filter(|t| t.kind != SyntaxKind::WHITESPACE)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn declaration() {
        assert_eq!(
            kinds("static int x = 42;"),
            vec![
                (SyntaxKind::KEYWORD, "static"),
                (SyntaxKind::KEYWORD_TYPE, "int"),
                (SyntaxKind::NAME, "x"),
                (SyntaxKind::OPERATOR, "="),
                (SyntaxKind::NUMBER, "42"),
                (SyntaxKind::PUNCTUATION, ";"),
            ]
        );
    }

    #[test]
    fn function_call_is_named() {
        let tokens = kinds("printf (\"%d\\n\", n)");
        assert_eq!(
            &tokens[..3],
            &[
                (SyntaxKind::NAME_FUNCTION, "printf"),
                (SyntaxKind::PUNCTUATION, "("),
                (SyntaxKind::STRING, "\"%d\\n\""),
            ]
        );
    }

    #[test]
    fn comments_and_preprocessor() {
        assert_eq!(
            kinds("#include <stdio.h>\n/* a\n b */ x // tail"),
            vec![
                (SyntaxKind::COMMENT_PREPROC, "#include <stdio.h>"),
                (SyntaxKind::COMMENT_MULTILINE, "/* a\n b */"),
                (SyntaxKind::NAME, "x"),
                (SyntaxKind::COMMENT_SINGLE, "// tail"),
            ]
        );
    }

    #[test]
    fn division_is_not_a_comment() {
        assert_eq!(
            kinds("a / b"),
            vec![
                (SyntaxKind::NAME, "a"),
                (SyntaxKind::OPERATOR, "/"),
                (SyntaxKind::NAME, "b"),
            ]
        );
    }

    #[test]
    fn unterminated_block_comment_runs_to_end() {
        assert_eq!(
            kinds("x /* never closed\n y"),
            vec![
                (SyntaxKind::NAME, "x"),
                (SyntaxKind::COMMENT_MULTILINE, "/* never closed\n y"),
            ]
        );
    }

    #[test]
    fn unknown_character_is_error() {
        assert_eq!(
            kinds("a @ b"),
            vec![
                (SyntaxKind::NAME, "a"),
                (SyntaxKind::ERROR, "@"),
                (SyntaxKind::NAME, "b"),
            ]
        );
    }
}
