use logos::{Lexer, Logos};

use super::raw_tokens;
use crate::lexer::{LanguageTokenizer, Token};
use crate::syntax_kind::SyntaxKind;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum PyToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"#[^\n]*")]
    Comment,

    #[regex(r#"[rRbBuUfF]{0,2}"([^"\\\n]|\\.)*""#)]
    #[regex(r"[rRbBuUfF]{0,2}'([^'\\\n]|\\.)*'")]
    Str,

    #[token(r#"""""#, |lex| triple_quoted(lex, r#"""""#))]
    #[token("'''", |lex| triple_quoted(lex, "'''"))]
    TripleStr,

    #[regex(r"@[A-Za-z_][A-Za-z0-9_.]*")]
    Decorator,

    #[regex(r"[0-9][0-9A-Za-z_.]*")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[-+*/%=<>!&|^~@]")]
    Operator,

    #[regex(r"[(){}\[\];,.:]")]
    Punct,
}

/// An unterminated triple-quoted string runs to the end of the input.
fn triple_quoted(lex: &mut Lexer<'_, PyToken>, quote: &str) -> bool {
    let len = match lex.remainder().find(quote) {
        Some(end) => end + quote.len(),
        None => lex.remainder().len(),
    };
    lex.bump(len);
    true
}

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

const CONSTANTS: &[&str] = &["True", "False", "None"];

const BUILTINS: &[&str] = &[
    "abs", "all", "any", "bool", "dict", "enumerate", "filter", "float", "int", "isinstance",
    "len", "list", "map", "max", "min", "open", "print", "range", "repr", "set", "sorted", "str",
    "sum", "super", "tuple", "type", "zip",
];

/// Python 3 lexer.
pub struct PythonLexer;

impl LanguageTokenizer for PythonLexer {
    fn name(&self) -> &'static str {
        "python"
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut previous_ident: Option<&str> = None;

        for (token, slice) in raw_tokens::<PyToken>(text) {
            let kind = match token {
                None => SyntaxKind::ERROR,
                Some(PyToken::Whitespace) => SyntaxKind::WHITESPACE,
                Some(PyToken::Comment) => SyntaxKind::COMMENT_SINGLE,
                Some(PyToken::Str) => SyntaxKind::STRING,
                Some(PyToken::TripleStr) => SyntaxKind::STRING_DOC,
                Some(PyToken::Decorator) => SyntaxKind::NAME_DECORATOR,
                Some(PyToken::Number) => SyntaxKind::NUMBER,
                Some(PyToken::Operator) => SyntaxKind::OPERATOR,
                Some(PyToken::Punct) => SyntaxKind::PUNCTUATION,
                Some(PyToken::Ident) => classify_ident(slice, previous_ident),
            };

            match token {
                Some(PyToken::Whitespace) => {}
                Some(PyToken::Ident) => previous_ident = Some(slice),
                _ => previous_ident = None,
            }
            tokens.push(Token::new(kind, slice));
        }

        tokens
    }
}

fn classify_ident(ident: &str, previous: Option<&str>) -> SyntaxKind {
    match previous {
        Some("def") => return SyntaxKind::NAME_FUNCTION,
        Some("class") => return SyntaxKind::NAME_CLASS,
        _ => {}
    }
    if KEYWORDS.contains(&ident) {
        SyntaxKind::KEYWORD
    } else if CONSTANTS.contains(&ident) {
        SyntaxKind::KEYWORD_CONSTANT
    } else if BUILTINS.contains(&ident) {
        SyntaxKind::NAME_BUILTIN
    } else {
        SyntaxKind::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<(SyntaxKind, &str)> {
        PythonLexer
            .tokenize(input)
            .into_iter()
            .filter(|t| t.kind != SyntaxKind::WHITESPACE)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn function_definition() {
        assert_eq!(
            kinds("def area(r): return None"),
            vec![
                (SyntaxKind::KEYWORD, "def"),
                (SyntaxKind::NAME_FUNCTION, "area"),
                (SyntaxKind::PUNCTUATION, "("),
                (SyntaxKind::NAME, "r"),
                (SyntaxKind::PUNCTUATION, ")"),
                (SyntaxKind::PUNCTUATION, ":"),
                (SyntaxKind::KEYWORD, "return"),
                (SyntaxKind::KEYWORD_CONSTANT, "None"),
            ]
        );
    }

    #[test]
    fn class_and_decorator() {
        assert_eq!(
            kinds("@dataclass\nclass Point:"),
            vec![
                (SyntaxKind::NAME_DECORATOR, "@dataclass"),
                (SyntaxKind::KEYWORD, "class"),
                (SyntaxKind::NAME_CLASS, "Point"),
                (SyntaxKind::PUNCTUATION, ":"),
            ]
        );
    }

    #[test]
    fn strings_and_comments() {
        assert_eq!(
            kinds("print(r'a\\b', \"c\")  # note"),
            vec![
                (SyntaxKind::NAME_BUILTIN, "print"),
                (SyntaxKind::PUNCTUATION, "("),
                (SyntaxKind::STRING, "r'a\\b'"),
                (SyntaxKind::PUNCTUATION, ","),
                (SyntaxKind::STRING, "\"c\""),
                (SyntaxKind::PUNCTUATION, ")"),
                (SyntaxKind::COMMENT_SINGLE, "# note"),
            ]
        );
    }

    #[test]
    fn docstring_spans_lines() {
        assert_eq!(
            kinds("\"\"\"Line one.\nLine two.\"\"\""),
            vec![(SyntaxKind::STRING_DOC, "\"\"\"Line one.\nLine two.\"\"\"")]
        );
    }
}
