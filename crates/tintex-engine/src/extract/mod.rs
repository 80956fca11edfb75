//! Finding tagged blocks in an intermediate document.
//!
//! A block looks like
//!
//! ```text
//! <@@NLN@display@3
//! lang=python,linenos
//! def f():
//!     pass
//! >@@NLN@display@3
//! ```
//!
//! The first line is the begin marker with the block kind and id, the second
//! the block's option string, and the block ends at the end marker of the
//! same kind, which must carry the same id. Blocks may be separated by
//! whitespace only; anything else stops the scan.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use crate::error::RenderError;
use crate::io::{Encoding, read_source, resolve_reference};
use crate::options::{OptionSet, OutputMode};

/// Marker tag written by the preprocessor.
pub const DEFAULT_TAG: &str = "@@NLN";

static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A(\d+)\n([^\n]*)\n").expect("Invalid block header regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Inline,
    Display,
    /// The body names a file whose contents are the snippet.
    Input,
}

impl BlockKind {
    /// Kinds in the order they are tried at each position.
    pub const ALL: [BlockKind; 3] = [BlockKind::Inline, BlockKind::Display, BlockKind::Input];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Inline => "inline",
            BlockKind::Display => "display",
            BlockKind::Input => "input",
        }
    }

    pub fn mode(self) -> OutputMode {
        match self {
            BlockKind::Inline => OutputMode::Inline,
            BlockKind::Display | BlockKind::Input => OutputMode::Display,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block as it appears in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub id: u32,
    /// The id as written, leading zeros included.
    pub id_text: &'a str,
    pub kind: BlockKind,
    pub options: &'a str,
    pub body: &'a str,
    /// Byte offset of the begin marker.
    pub offset: usize,
}

impl RawBlock<'_> {
    /// `baseline` with this block's overrides and output mode.
    pub fn resolve_options(&self, baseline: &OptionSet) -> OptionSet {
        baseline
            .with_overrides(self.options)
            .with_mode(self.kind.mode())
    }

    /// The snippet text: the body itself, or the contents of the file it
    /// names for input blocks.
    pub fn source_text(
        &self,
        options: &OptionSet,
        base_dir: &Path,
    ) -> Result<Cow<'_, str>, RenderError> {
        if self.kind != BlockKind::Input {
            return Ok(Cow::Borrowed(self.body));
        }

        let path = resolve_reference(self.body.trim(), base_dir);
        let unreadable = |reason: String| RenderError::FileReferenceUnreadable {
            path: path.clone(),
            reason,
        };
        let encoding =
            Encoding::from_label(&options.encoding).map_err(|e| unreadable(e.to_string()))?;
        let text = read_source(&path, encoding).map_err(|e| unreadable(e.to_string()))?;
        Ok(Cow::Owned(text))
    }
}

/// Scans documents for blocks marked with one tag.
#[derive(Debug, Clone)]
pub struct Extractor {
    tag: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_TAG)
    }
}

impl Extractor {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// Blocks of `document` in order. After an error the iterator ends.
    pub fn blocks<'e, 'a>(&'e self, document: &'a str) -> Blocks<'e, 'a> {
        Blocks {
            tag: &self.tag,
            document,
            position: 0,
            done: false,
        }
    }
}

pub struct Blocks<'e, 'a> {
    tag: &'e str,
    document: &'a str,
    position: usize,
    done: bool,
}

impl<'a> Blocks<'_, 'a> {
    fn malformed(
        &mut self,
        offset: usize,
        reason: String,
    ) -> Option<Result<RawBlock<'a>, RenderError>> {
        self.done = true;
        Some(Err(RenderError::MalformedBlockTag { offset, reason }))
    }
}

impl<'a> Iterator for Blocks<'_, 'a> {
    type Item = Result<RawBlock<'a>, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let document = self.document;
        let tag = self.tag;

        let rest = &document[self.position..];
        let start = self.position + (rest.len() - rest.trim_start().len());
        let rest = &document[start..];
        if rest.is_empty() {
            self.done = true;
            return None;
        }

        let Some((kind, after_begin)) = BlockKind::ALL.into_iter().find_map(|kind| {
            rest.strip_prefix(format!("<{tag}@{kind}@").as_str())
                .map(|after| (kind, after))
        }) else {
            return self.malformed(start, "expected a block begin marker".to_string());
        };

        let Some(header) = HEADER.captures(after_begin) else {
            return self.malformed(start, format!("incomplete {kind} block header"));
        };
        let begin_id = header.get(1).map_or("", |m| m.as_str());
        let Ok(id) = begin_id.parse::<u32>() else {
            return self.malformed(start, format!("block id {begin_id} is out of range"));
        };
        let options = header.get(2).map_or("", |m| m.as_str());

        // Search from the options line break so an empty body needs no extra line.
        let body_start = start + (rest.len() - after_begin.len()) + header[0].len();
        let end_marker = format!("\n>{tag}@{kind}@");
        let Some(found) = document[body_start - 1..].find(&end_marker) else {
            return self.malformed(start, format!("{kind} block {id} has no end marker"));
        };
        let body_end = body_start - 1 + found;
        let body = if body_end < body_start {
            ""
        } else {
            &document[body_start..body_end]
        };

        let after_end = &document[body_end + end_marker.len()..];
        let digits = after_end
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after_end.len());
        let end_id = &after_end[..digits];
        if end_id != begin_id {
            return self.malformed(
                body_end + 1,
                format!("end marker id '{end_id}' does not match begin id '{begin_id}'"),
            );
        }

        let tail = &after_end[digits..];
        let consumed = match tail.chars().next() {
            None => 0,
            Some('\n') => 1,
            Some(_) => {
                return self.malformed(body_end + 1, "trailing text after end marker".to_string());
            }
        };
        self.position = document.len() - tail.len() + consumed;

        Some(Ok(RawBlock {
            id,
            id_text: begin_id,
            kind,
            options,
            body,
            offset: start,
        }))
    }
}
