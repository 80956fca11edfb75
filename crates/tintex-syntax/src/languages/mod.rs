//! Built-in language lexers and the alias registry.
//!
//! Each lexer is a Logos token enum plus a classification pass mapping
//! Logos variants (and a little context) to [`SyntaxKind`]s. The plain text
//! lexer is small enough to write by hand.

mod c;
mod python;
mod tex;
mod text;

use logos::Logos;

use crate::lexer::LanguageTokenizer;

pub use c::CLexer;
pub use python::PythonLexer;
pub use tex::TexLexer;
pub use text::TextLexer;

type Entry = (&'static [&'static str], &'static dyn LanguageTokenizer);

static LANGUAGES: &[Entry] = &[
    (&["text", "plain", "txt", "none"], &TextLexer),
    (&["c", "h"], &CLexer),
    (&["python", "py", "python3", "py3"], &PythonLexer),
    (&["tex", "latex"], &TexLexer),
];

pub(crate) fn lookup(lang: &str) -> Option<&'static dyn LanguageTokenizer> {
    let lang = lang.trim().to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|(aliases, _)| aliases.contains(&lang.as_str()))
        .map(|(_, lexer)| *lexer)
}

/// Run a Logos lexer to completion, keeping unrecognized input as `None`.
///
/// Logos reports unknown bytes as errors but still advances over them, so
/// the returned slices cover the whole input.
pub(crate) fn raw_tokens<'a, T>(input: &'a str) -> Vec<(Option<T>, &'a str)>
where
    T: Logos<'a, Source = str>,
    T::Extras: Default,
{
    let mut tokens = Vec::new();
    let mut lexer = T::lexer(input);

    while let Some(result) = lexer.next() {
        tokens.push((result.ok(), lexer.slice()));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("text", "  hello world\n\tsecond line  \n")]
    #[case("c", "#include <stdio.h>\nint main(void) { /* hi */ return 0; } // done\n")]
    #[case("c", "char *s = \"unterminated\n'x' 0x1F @ `\n/* open")]
    #[case("python", "@decorator\ndef f(x):\n    \"\"\"Doc.\"\"\"\n    return x ** 2  # square\n")]
    #[case("python", "s = 'open\n''' never closed")]
    #[case("tex", "\\section{Intro} % comment\n$x^2$ and $$y_1$$ \\\\ text & more\n")]
    #[case("tex", "$unterminated math\n\\")]
    fn every_lexer_is_lossless(#[case] lang: &str, #[case] input: &str) {
        let lexer = lookup(lang).unwrap();
        let tokens = lexer.tokenize(input);
        let reconstructed: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
        assert!(tokens.iter().all(|t| !t.text.is_empty()));
    }

    #[test]
    fn lookup_ignores_case_and_padding() {
        assert_eq!(lookup(" Python ").map(|l| l.name()), Some("python"));
        assert_eq!(lookup("C").map(|l| l.name()), Some("c"));
    }
}
