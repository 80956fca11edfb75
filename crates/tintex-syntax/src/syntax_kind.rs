//! SyntaxKind enum for every token classification a lexer can produce.
//!
//! Kinds form a tree rooted at [`SyntaxKind::TOKEN`]. Style class names are
//! derived by walking a kind's ancestor chain, so the chain of every kind is
//! computed once and kept in a static table.

use once_cell::sync::Lazy;

/// All token classifications.
///
/// The `repr(u16)` lets a kind index directly into the ancestor table.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    /// Root of the hierarchy; never attached to a lexed token
    TOKEN,
    /// Plain text
    TEXT,
    /// Spaces, tabs and line endings
    WHITESPACE,
    /// Literal markup passed through verbatim
    ESCAPE,
    /// Input the lexer could not classify
    ERROR,
    /// Foreign content
    OTHER,

    KEYWORD,
    KEYWORD_CONSTANT,
    KEYWORD_TYPE,

    NAME,
    NAME_BUILTIN,
    NAME_FUNCTION,
    NAME_CLASS,
    NAME_DECORATOR,

    LITERAL,
    STRING,
    STRING_CHAR,
    STRING_DOC,
    STRING_ESCAPE,
    NUMBER,

    OPERATOR,
    PUNCTUATION,

    COMMENT,
    COMMENT_SINGLE,
    COMMENT_MULTILINE,
    COMMENT_PREPROC,

    GENERIC,
}

impl SyntaxKind {
    /// Every kind, in declaration order.
    pub const ALL: [SyntaxKind; 27] = [
        Self::TOKEN,
        Self::TEXT,
        Self::WHITESPACE,
        Self::ESCAPE,
        Self::ERROR,
        Self::OTHER,
        Self::KEYWORD,
        Self::KEYWORD_CONSTANT,
        Self::KEYWORD_TYPE,
        Self::NAME,
        Self::NAME_BUILTIN,
        Self::NAME_FUNCTION,
        Self::NAME_CLASS,
        Self::NAME_DECORATOR,
        Self::LITERAL,
        Self::STRING,
        Self::STRING_CHAR,
        Self::STRING_DOC,
        Self::STRING_ESCAPE,
        Self::NUMBER,
        Self::OPERATOR,
        Self::PUNCTUATION,
        Self::COMMENT,
        Self::COMMENT_SINGLE,
        Self::COMMENT_MULTILINE,
        Self::COMMENT_PREPROC,
        Self::GENERIC,
    ];

    /// Direct parent in the hierarchy, `None` for the root.
    pub fn parent(self) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        match self {
            TOKEN => None,
            TEXT | ESCAPE | ERROR | OTHER | KEYWORD | NAME | LITERAL | OPERATOR | PUNCTUATION
            | COMMENT | GENERIC => Some(TOKEN),
            WHITESPACE => Some(TEXT),
            KEYWORD_CONSTANT | KEYWORD_TYPE => Some(KEYWORD),
            NAME_BUILTIN | NAME_FUNCTION | NAME_CLASS | NAME_DECORATOR => Some(NAME),
            STRING | NUMBER => Some(LITERAL),
            STRING_CHAR | STRING_DOC | STRING_ESCAPE => Some(STRING),
            COMMENT_SINGLE | COMMENT_MULTILINE | COMMENT_PREPROC => Some(COMMENT),
        }
    }

    /// Ancestors from the first level below the root down to `self`.
    ///
    /// `COMMENT_SINGLE.chain()` is `[COMMENT, COMMENT_SINGLE]`; the root has an
    /// empty chain.
    pub fn chain(self) -> &'static [SyntaxKind] {
        &CHAINS[self as usize]
    }

    /// Returns true if `self` is `ancestor` or one of its descendants.
    pub fn is_a(self, ancestor: SyntaxKind) -> bool {
        ancestor == Self::TOKEN || self.chain().contains(&ancestor)
    }

    /// Returns true if this kind is trivia (whitespace and line endings).
    pub fn is_trivia(self) -> bool {
        self == Self::WHITESPACE
    }

    /// Comments and strings are never split for escapes.
    pub fn is_opaque(self) -> bool {
        self.is_a(Self::COMMENT) || self.is_a(Self::STRING)
    }

    /// Short class name, as used by style sheets that define the kind.
    pub fn short_name(self) -> &'static str {
        use SyntaxKind::*;
        match self {
            TOKEN => "",
            TEXT => "tx",
            WHITESPACE => "w",
            ESCAPE => "esc",
            ERROR => "err",
            OTHER => "x",
            KEYWORD => "k",
            KEYWORD_CONSTANT => "kc",
            KEYWORD_TYPE => "kt",
            NAME => "n",
            NAME_BUILTIN => "nb",
            NAME_FUNCTION => "nf",
            NAME_CLASS => "nc",
            NAME_DECORATOR => "nd",
            LITERAL => "l",
            STRING => "s",
            STRING_CHAR => "sc",
            STRING_DOC => "sd",
            STRING_ESCAPE => "se",
            NUMBER => "m",
            OPERATOR => "o",
            PUNCTUATION => "p",
            COMMENT => "c",
            COMMENT_SINGLE => "c1",
            COMMENT_MULTILINE => "cm",
            COMMENT_PREPROC => "cp",
            GENERIC => "g",
        }
    }

    /// Name used when the active style has nothing explicit for this kind.
    pub fn generic_name(self) -> &'static str {
        use SyntaxKind::*;
        match self {
            TOKEN => "",
            TEXT => "text",
            WHITESPACE => "whitespace",
            ESCAPE => "escape",
            ERROR => "error",
            OTHER => "other",
            KEYWORD => "keyword",
            KEYWORD_CONSTANT => "constant",
            KEYWORD_TYPE => "type",
            NAME => "name",
            NAME_BUILTIN => "builtin",
            NAME_FUNCTION => "function",
            NAME_CLASS => "class",
            NAME_DECORATOR => "decorator",
            LITERAL => "literal",
            STRING => "string",
            STRING_CHAR => "char",
            STRING_DOC => "doc",
            STRING_ESCAPE => "escape",
            NUMBER => "number",
            OPERATOR => "operator",
            PUNCTUATION => "punctuation",
            COMMENT => "comment",
            COMMENT_SINGLE => "single",
            COMMENT_MULTILINE => "multiline",
            COMMENT_PREPROC => "preproc",
            GENERIC => "generic",
        }
    }
}

static CHAINS: Lazy<Vec<Vec<SyntaxKind>>> = Lazy::new(|| {
    SyntaxKind::ALL
        .iter()
        .map(|&kind| {
            let mut chain = Vec::new();
            let mut current = Some(kind);
            while let Some(k) = current {
                if k == SyntaxKind::TOKEN {
                    break;
                }
                chain.push(k);
                current = k.parent();
            }
            chain.reverse();
            chain
        })
        .collect()
});
