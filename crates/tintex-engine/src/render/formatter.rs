//! Token stream to tagged TeX markup.
//!
//! Text is escaped character by character into `\PYZ..{}` macros, except
//! escape tokens, which are emitted verbatim, and the raw parts of comments
//! selected by the comment modes. Each run is wrapped in `\PY{<classes>}{..}`,
//! closed and reopened at line breaks so a tag never spans two output lines.

use tintex_syntax::{SyntaxKind, Token};

use super::escape::literal_body;
use crate::options::{EscapePair, OptionSet};
use crate::style::Style;

/// Characters with a special meaning to TeX and the macro suffix that
/// replaces each of them.
pub const TEX_ESCAPES: &[(char, &str)] = &[
    ('\\', "Zbs"),
    ('{', "Zob"),
    ('}', "Zcb"),
    ('^', "Zca"),
    ('_', "Zus"),
    ('&', "Zam"),
    ('<', "Zlt"),
    ('>', "Zgt"),
    ('#', "Zsh"),
    ('%', "Zpc"),
    ('$', "Zdl"),
    ('-', "Zhy"),
    ('\'', "Zsq"),
    ('"', "Zdq"),
    ('~', "Zti"),
];

/// Replace every TeX special character with its `\PYZ..{}` macro.
pub fn escape_tex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match TEX_ESCAPES.iter().find(|(special, _)| *special == ch) {
            Some((_, name)) => {
                out.push_str("\\PY");
                out.push_str(name);
                out.push_str("{}");
            }
            None => out.push(ch),
        }
    }
    out
}

/// How comment text is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentMode {
    /// The comment lexeme is escaped and the rest is TeX source.
    TexSource,
    /// `$..$` spans are math, everything else is escaped.
    Math,
    /// Delimited spans are raw, everything else is escaped.
    Inline(EscapePair),
    Escaped,
}

impl CommentMode {
    pub fn from_options(options: &OptionSet) -> Self {
        if options.tex_comments {
            CommentMode::TexSource
        } else if options.math_escape {
            CommentMode::Math
        } else if let Some(pair) = options.escape_inside {
            CommentMode::Inline(pair)
        } else {
            CommentMode::Escaped
        }
    }

    pub fn render(self, comment: &str) -> String {
        match self {
            CommentMode::TexSource => {
                let lead = comment
                    .chars()
                    .next()
                    .map_or(0, |first| {
                        comment
                            .char_indices()
                            .find(|(_, ch)| *ch != first)
                            .map_or(comment.len(), |(index, _)| index)
                    });
                format!("{}{}", escape_tex(&comment[..lead]), &comment[lead..])
            }
            CommentMode::Math => comment
                .split('$')
                .enumerate()
                .map(|(index, part)| {
                    if index % 2 == 0 {
                        escape_tex(part)
                    } else {
                        part.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join("$"),
            CommentMode::Inline(pair) => render_inline_escapes(comment, pair),
            CommentMode::Escaped => escape_tex(comment),
        }
    }
}

/// Unlike escapes in code, an unclosed delimiter in a comment is not an
/// error: it and the rest of the comment are escaped.
fn render_inline_escapes(comment: &str, pair: EscapePair) -> String {
    let mut out = String::new();
    let mut rest = comment;

    while let Some(open) = rest.find(pair.left) {
        out.push_str(&escape_tex(&rest[..open]));
        let interior = &rest[open + pair.left.len_utf8()..];
        match interior.find(pair.right) {
            Some(close) => {
                out.push_str(&interior[..close]);
                rest = &interior[close + pair.right.len_utf8()..];
            }
            None => {
                out.push_str(&escape_tex(&rest[open..]));
                return out;
            }
        }
    }

    out.push_str(&escape_tex(rest));
    out
}

/// Tagged markup of a snippet, one output line per source line, each
/// ending with `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedBlock {
    pub body: String,
}

impl FormattedBlock {
    /// Body lines without the final line break.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.body
            .strip_suffix('\n')
            .unwrap_or(&self.body)
            .split('\n')
    }
}

/// Formats tokens of one snippet.
pub struct MarkupFormatter<'s> {
    style: &'s Style,
    comments: CommentMode,
}

impl<'s> MarkupFormatter<'s> {
    pub fn new(style: &'s Style, options: &OptionSet) -> Self {
        Self {
            style,
            comments: CommentMode::from_options(options),
        }
    }

    pub fn format(&self, tokens: &[Token<'_>]) -> FormattedBlock {
        let mut body = String::new();
        for token in tokens {
            self.format_token(token, &mut body);
        }
        FormattedBlock { body }
    }

    fn format_token(&self, token: &Token<'_>, out: &mut String) {
        let kind = token.kind;
        if kind == SyntaxKind::ESCAPE {
            out.push_str(literal_body(token.text));
            return;
        }

        let value = if kind.is_a(SyntaxKind::COMMENT) {
            self.comments.render(token.text)
        } else {
            escape_tex(token.text)
        };

        if kind.is_trivia() {
            out.push_str(&value);
            return;
        }

        let class = self.style.style_class(kind);
        let mut parts = value.split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                out.push_str("\\PY{");
                out.push_str(&class);
                out.push_str("}{");
                out.push_str(part);
                out.push('}');
            }
            if parts.peek().is_some() {
                out.push('\n');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tintex_syntax::lexer::lookup;

    fn format(lang: &str, text: &str, overrides: &str) -> FormattedBlock {
        let options = OptionSet::default().with_overrides(overrides);
        let style = style::lookup(&options.style).unwrap();
        let lexer = lookup(lang).unwrap();
        MarkupFormatter::new(style, &options).format(&lexer.tokenize(text))
    }

    #[rstest]
    #[case("a_b", r"a\PYZus{}b")]
    #[case(r"\x{y}", r"\PYZbs{}x\PYZob{}y\PYZcb{}")]
    #[case("50% & $5", r"50\PYZpc{} \PYZam{} \PYZdl{}5")]
    #[case("a->b", r"a\PYZhy{}\PYZgt{}b")]
    #[case("plain text", "plain text")]
    fn escapes_tex_specials(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_tex(input), expected);
    }

    #[test]
    fn tex_source_comments_escape_only_the_lexeme() {
        assert_eq!(CommentMode::TexSource.render("// $x^2$"), "// $x^2$");
        assert_eq!(
            CommentMode::TexSource.render("%% \\emph{x}"),
            r"\PYZpc{}\PYZpc{} \emph{x}"
        );
        assert_eq!(CommentMode::TexSource.render("#"), r"\PYZsh{}");
    }

    #[test]
    fn math_comments_keep_dollar_spans() {
        assert_eq!(
            CommentMode::Math.render("# cost $O(n^2)$ a_b"),
            r"\PYZsh{} cost $O(n^2)$ a\PYZus{}b"
        );
    }

    #[test]
    fn inline_comment_escapes() {
        let mode = CommentMode::Inline(EscapePair::parse("!$").unwrap());
        assert_eq!(mode.render("# see !\\ref{x}$_"), r"\PYZsh{} see \ref{x}\PYZus{}");
        assert_eq!(mode.render("# open !x_"), r"\PYZsh{} open !x\PYZus{}");
    }

    #[test]
    fn comment_mode_priority() {
        let all = OptionSet::default().with_overrides("texcomments,mathescape,escapeinside=||");
        assert_eq!(CommentMode::from_options(&all), CommentMode::TexSource);
        let math = OptionSet::default().with_overrides("mathescape,escapeinside=!$");
        assert_eq!(CommentMode::from_options(&math), CommentMode::Math);
        assert_eq!(
            CommentMode::from_options(&OptionSet::default()),
            CommentMode::Escaped
        );
    }

    #[test]
    fn text_is_a_single_run() {
        let block = format("text", "hello world\n", "");
        assert_eq!(block.body, "\\PY{tx}{hello world}\n");
    }

    #[test]
    fn whitespace_is_never_tagged() {
        let block = format("text", "  hi\n", "");
        assert_eq!(block.body, "  \\PY{tx}{hi}\n");
        let style = style::lookup("default").unwrap();
        assert!(style.rule(SyntaxKind::WHITESPACE).is_none());
    }

    #[test]
    fn multiline_tokens_are_reopened_per_line() {
        let block = format("c", "/* a\n\n b */\n", "");
        assert_snapshot!(block.body.replace('\n', "|"), @r"\PY{c+cm}{/* a}||\PY{c+cm}{ b */}|");
    }

    #[test]
    fn code_is_tagged_and_escaped() {
        let block = format("c", "return a_b;\n", "");
        assert_snapshot!(block.body.trim_end(), @r"\PY{k}{return} \PY{name}{a\PYZus{}b}\PY{punctuation}{;}");
    }

    #[test]
    fn escape_tokens_are_verbatim() {
        let options = OptionSet::default().with_overrides("escapeinside=!$");
        let style = style::lookup("default").unwrap();
        let tokens = [
            Token::new(SyntaxKind::NAME, "x"),
            Token::new(SyntaxKind::ESCAPE, "!\\textbf{y}$"),
        ];
        let block = MarkupFormatter::new(style, &options).format(&tokens);
        assert_eq!(block.body, "\\PY{name}{x}\\textbf{y}");
    }

    #[test]
    fn lines_drop_final_break() {
        let block = format("text", "a\n\nb\n", "");
        assert_eq!(
            block.lines().collect::<Vec<_>>(),
            vec!["\\PY{tx}{a}", "", "\\PY{tx}{b}"]
        );
    }
}
