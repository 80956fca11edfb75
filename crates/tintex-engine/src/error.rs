use std::path::PathBuf;

/// Everything that can stop a snippet from rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    #[error("Unterminated escape: '{delimiter}' at byte {offset} has no closing delimiter")]
    UnterminatedEscape { delimiter: char, offset: usize },

    #[error("Malformed block tag at byte {offset}: {reason}")]
    MalformedBlockTag { offset: usize, reason: String },

    #[error("Cannot read referenced file {path}: {reason}")]
    FileReferenceUnreadable { path: PathBuf, reason: String },

    #[error("Cache error at {path}: {source}")]
    Cache {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RenderError {
    /// Fatal errors end the scan of the whole document; all others only
    /// cost the block they occurred in.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::MalformedBlockTag { .. })
    }
}

/// An error tied to the block it came from, if any.
#[derive(Debug)]
pub struct Diagnostic {
    pub block: Option<u32>,
    pub error: RenderError,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.block {
            Some(id) => write!(f, "block {id}: {}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_malformed_tags_are_fatal() {
        let malformed = RenderError::MalformedBlockTag {
            offset: 0,
            reason: "x".to_string(),
        };
        assert!(malformed.is_fatal());
        assert!(!RenderError::UnknownLanguage("cobol".to_string()).is_fatal());
        assert!(
            !RenderError::UnterminatedEscape {
                delimiter: '|',
                offset: 3
            }
            .is_fatal()
        );
    }

    #[test]
    fn diagnostic_mentions_block() {
        let diagnostic = Diagnostic {
            block: Some(7),
            error: RenderError::UnknownLanguage("cobol".to_string()),
        };
        assert_eq!(diagnostic.to_string(), "block 7: Unknown language: cobol");
    }
}
