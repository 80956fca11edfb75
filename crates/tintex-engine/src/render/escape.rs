//! Splitting code text on an escape delimiter pair.

use crate::error::RenderError;
use crate::options::EscapePair;

/// A piece of code text after escape splitting.
///
/// Escape segments keep their delimiters, so concatenating all segment texts
/// gives back the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text to be tokenized as code.
    Code(&'a str),
    /// `left ... right`, passed through to the output verbatim.
    Escape(&'a str),
}

/// Split `text` into code and escape segments.
///
/// `origin` is the byte offset of `text` within the snippet and is only used
/// to report where an unterminated escape starts. Without a delimiter pair
/// the whole text is a single code segment.
pub fn split_escapes(
    text: &str,
    pair: Option<EscapePair>,
    origin: usize,
) -> Result<Vec<Segment<'_>>, RenderError> {
    let Some(pair) = pair else {
        return Ok(non_empty_code(text).into_iter().collect());
    };

    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(pair.left) {
        segments.extend(non_empty_code(&rest[..open]));

        let interior_start = open + pair.left.len_utf8();
        let Some(close) = rest[interior_start..].find(pair.right) else {
            return Err(RenderError::UnterminatedEscape {
                delimiter: pair.left,
                offset: origin + (text.len() - rest.len()) + open,
            });
        };

        let end = interior_start + close + pair.right.len_utf8();
        segments.push(Segment::Escape(&rest[open..end]));
        rest = &rest[end..];
    }

    segments.extend(non_empty_code(rest));
    Ok(segments)
}

/// The text between the delimiters of an escape segment.
pub fn literal_body(escape: &str) -> &str {
    let mut chars = escape.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

fn non_empty_code(text: &str) -> Option<Segment<'_>> {
    (!text.is_empty()).then_some(Segment::Code(text))
}
