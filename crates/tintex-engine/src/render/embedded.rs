//! Language tokenization with embedded escapes.
//!
//! The language lexer runs over the whole snippet first. Comment and string
//! tokens are kept as they are; runs of other tokens are joined back into
//! text, split on the escape delimiters, and the code parts re-tokenized.
//! The result is a refinement of the plain token stream: same text, same
//! order, finer or coarser boundaries around escapes.

use tintex_syntax::{LanguageTokenizer, SyntaxKind, Token};

use super::escape::{Segment, split_escapes};
use crate::error::RenderError;
use crate::options::EscapePair;

pub fn tokenize_embedded<'a>(
    lexer: &dyn LanguageTokenizer,
    text: &'a str,
    pair: Option<EscapePair>,
) -> Result<Vec<Token<'a>>, RenderError> {
    let plain = lexer.tokenize(text);
    if pair.is_none() {
        return Ok(plain);
    }

    let mut tokens = Vec::with_capacity(plain.len());
    let mut pending = 0..0;
    let mut offset = 0;

    for token in plain {
        let end = offset + token.text.len();
        if token.kind.is_opaque() {
            flush(lexer, text, pending.clone(), pair, &mut tokens)?;
            tokens.push(token);
            pending = end..end;
        } else {
            pending.end = end;
        }
        offset = end;
    }
    flush(lexer, text, pending, pair, &mut tokens)?;

    Ok(tokens)
}

fn flush<'a>(
    lexer: &dyn LanguageTokenizer,
    text: &'a str,
    range: std::ops::Range<usize>,
    pair: Option<EscapePair>,
    tokens: &mut Vec<Token<'a>>,
) -> Result<(), RenderError> {
    if range.is_empty() {
        return Ok(());
    }

    for segment in split_escapes(&text[range.clone()], pair, range.start)? {
        match segment {
            Segment::Code(code) => tokens.extend(lexer.tokenize(code)),
            Segment::Escape(escape) => tokens.push(Token::new(SyntaxKind::ESCAPE, escape)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tintex_syntax::lexer::lookup;

    fn embedded(lang: &str, text: &str, pair: &str) -> Vec<(SyntaxKind, String)> {
        let lexer = lookup(lang).unwrap();
        tokenize_embedded(lexer, text, EscapePair::parse(pair))
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text.to_string()))
            .collect()
    }

    fn escapes(tokens: &[(SyntaxKind, String)]) -> Vec<&str> {
        tokens
            .iter()
            .filter(|(kind, _)| *kind == SyntaxKind::ESCAPE)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    #[test]
    fn no_pair_is_plain_tokenization() {
        let lexer = lookup("c").unwrap();
        let text = "int x = |y|; // |z|\n";
        assert_eq!(
            tokenize_embedded(lexer, text, None).unwrap(),
            lexer.tokenize(text)
        );
    }

    #[test]
    fn escapes_in_code_are_extracted() {
        let tokens = embedded("c", "x = !\\alpha$ + 1;\n", "!$");
        assert_eq!(escapes(&tokens), vec!["!\\alpha$"]);
        assert!(tokens.contains(&(SyntaxKind::NAME, "x".to_string())));
        assert!(tokens.contains(&(SyntaxKind::NUMBER, "1".to_string())));
    }

    #[test]
    fn comments_and_strings_are_not_split() {
        let tokens = embedded("c", "s = \"!a$\"; // !b$\n", "!$");
        assert_eq!(escapes(&tokens), Vec::<&str>::new());
        assert!(tokens.contains(&(SyntaxKind::STRING, "\"!a$\"".to_string())));
        assert!(tokens.contains(&(SyntaxKind::COMMENT_SINGLE, "// !b$".to_string())));
    }

    #[test]
    fn escape_count_matches_spans_and_text_round_trips() {
        let text = "def f(!a$, !b$):\n    return !c$ # done\n";
        let tokens = embedded("python", text, "!$");
        assert_eq!(escapes(&tokens).len(), 3);

        let joined: String = tokens.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn escape_spanning_tokens_of_one_run() {
        let tokens = embedded("c", "a !x + y$ b\n", "!$");
        assert_eq!(escapes(&tokens), vec!["!x + y$"]);
    }

    #[test]
    fn unterminated_escape_fails_the_snippet() {
        let lexer = lookup("c").unwrap();
        let err = tokenize_embedded(lexer, "/* c */ a !b\n", EscapePair::parse("!$"))
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnterminatedEscape {
                delimiter: '!',
                offset: 10
            }
        ));
    }
}
