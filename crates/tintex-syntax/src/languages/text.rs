use crate::lexer::{LanguageTokenizer, Token};
use crate::syntax_kind::SyntaxKind;

/// Plain text: one `TEXT` run per line, with indentation and line endings
/// split off as whitespace.
pub struct TextLexer;

impl LanguageTokenizer for TextLexer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();

        for line in text.split_inclusive('\n') {
            let body = line.strip_suffix('\n').unwrap_or(line);
            let newline = &line[body.len()..];
            let indent_len = body.len() - body.trim_start_matches([' ', '\t']).len();
            let (indent, content) = body.split_at(indent_len);

            if !indent.is_empty() {
                tokens.push(Token::new(SyntaxKind::WHITESPACE, indent));
            }
            if !content.is_empty() {
                tokens.push(Token::new(SyntaxKind::TEXT, content));
            }
            if !newline.is_empty() {
                tokens.push(Token::new(SyntaxKind::WHITESPACE, newline));
            }
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: SyntaxKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    #[test]
    fn lex_empty_input() {
        assert!(TextLexer.tokenize("").is_empty());
    }

    #[test]
    fn interior_spaces_stay_in_one_run() {
        assert_eq!(
            TextLexer.tokenize("hello world\n"),
            vec![
                token(SyntaxKind::TEXT, "hello world"),
                token(SyntaxKind::WHITESPACE, "\n"),
            ]
        );
    }

    #[test]
    fn indentation_is_whitespace() {
        assert_eq!(
            TextLexer.tokenize("  indented\n\n"),
            vec![
                token(SyntaxKind::WHITESPACE, "  "),
                token(SyntaxKind::TEXT, "indented"),
                token(SyntaxKind::WHITESPACE, "\n"),
                token(SyntaxKind::WHITESPACE, "\n"),
            ]
        );
    }
}
