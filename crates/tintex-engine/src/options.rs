//! Typed rendering options.
//!
//! Blocks carry option strings such as `lang=python,linenos,gobble=4`. Each
//! block's string is layered over a baseline [`OptionSet`] to produce a new
//! set; the baseline itself never changes. Unknown keys and unparseable
//! values are logged and ignored.

use std::collections::BTreeMap;
use std::fmt;

use tintex_syntax::LexOptions;

use crate::render::lines::LineNumbering;

/// Left and right escape delimiters. Always two distinct characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapePair {
    pub left: char,
    pub right: char,
}

impl EscapePair {
    /// Parse a two-character delimiter string such as `||` or `!!`.
    pub fn parse(value: &str) -> Option<Self> {
        let mut chars = value.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(left), Some(right), None) if left != right => Some(Self { left, right }),
            _ => None,
        }
    }
}

impl fmt::Display for EscapePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.left, self.right)
    }
}

/// How the rendered snippet is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Inline,
    Display,
}

impl OutputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Inline => "inline",
            OutputMode::Display => "display",
        }
    }
}

/// A value in an option string: `key=value` or a bare `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue<'a> {
    Flag,
    Text(&'a str),
}

/// Resolved options for one snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    pub lang: String,
    pub style: String,
    pub escape_inside: Option<EscapePair>,
    pub math_escape: bool,
    pub tex_comments: bool,
    pub gobble: usize,
    pub tab_size: usize,
    pub linenos: bool,
    pub lineno_start: u32,
    pub lineno_step: u32,
    pub lineno_sep: String,
    pub encoding: String,
    pub mode: OutputMode,
}

impl Default for OptionSet {
    fn default() -> Self {
        Self {
            lang: "c".to_string(),
            style: "default".to_string(),
            escape_inside: None,
            math_escape: false,
            tex_comments: false,
            gobble: 0,
            tab_size: 8,
            linenos: false,
            lineno_start: 1,
            lineno_step: 1,
            lineno_sep: "0pt".to_string(),
            encoding: "guess".to_string(),
            mode: OutputMode::Display,
        }
    }
}

impl OptionSet {
    /// A copy of `self` with the overrides of an option string applied.
    pub fn with_overrides(&self, overrides: &str) -> OptionSet {
        let mut options = self.clone();
        for (key, value) in parse_option_string(overrides) {
            options.apply(key, value);
        }
        options
    }

    /// A copy of `self` with `key=value` pairs applied, e.g. from a config file.
    pub fn with_pairs<'a, I>(&self, pairs: I) -> OptionSet
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = self.clone();
        for (key, value) in pairs {
            options.apply(key, OptionValue::Text(value));
        }
        options
    }

    pub fn with_mode(&self, mode: OutputMode) -> OptionSet {
        OptionSet {
            mode,
            ..self.clone()
        }
    }

    pub fn lex_options(&self) -> LexOptions {
        LexOptions {
            tab_size: self.tab_size,
        }
    }

    pub fn numbering(&self) -> LineNumbering {
        LineNumbering {
            enabled: self.linenos,
            start: self.lineno_start,
            step: self.lineno_step,
        }
    }

    /// Serialization with a fixed key order, used for content digests.
    pub fn canonical(&self) -> String {
        let mut fields = BTreeMap::new();
        fields.insert("encoding", self.encoding.clone());
        fields.insert(
            "escapeinside",
            self.escape_inside
                .map(|pair| pair.to_string())
                .unwrap_or_default(),
        );
        fields.insert("gobble", self.gobble.to_string());
        fields.insert("lang", self.lang.clone());
        fields.insert("linenos", self.linenos.to_string());
        fields.insert("linenosep", self.lineno_sep.clone());
        fields.insert("linenostart", self.lineno_start.to_string());
        fields.insert("linenostep", self.lineno_step.to_string());
        fields.insert("mathescape", self.math_escape.to_string());
        fields.insert("mode", self.mode.as_str().to_string());
        fields.insert("sty", self.style.clone());
        fields.insert("tabsize", self.tab_size.to_string());
        fields.insert("texcomments", self.tex_comments.to_string());

        fields
            .into_iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect()
    }

    fn apply(&mut self, key: &str, value: OptionValue<'_>) {
        let applied = match key {
            "lang" => set_string(&mut self.lang, value),
            "sty" | "style" => set_string(&mut self.style, value),
            "linenosep" => set_string(&mut self.lineno_sep, value),
            "encoding" => set_string(&mut self.encoding, value),
            "mathescape" => set_bool(&mut self.math_escape, value),
            "texcomments" => set_bool(&mut self.tex_comments, value),
            "linenos" => set_bool(&mut self.linenos, value),
            "gobble" => set_count(&mut self.gobble, value),
            "tabsize" => set_count(&mut self.tab_size, value),
            "linenostart" => set_number(&mut self.lineno_start, value, 0),
            "linenostep" => set_number(&mut self.lineno_step, value, 1),
            "escapeinside" => self.set_escape_inside(value),
            _ => {
                log::warn!("Ignoring unknown option '{key}'");
                return;
            }
        };

        if !applied {
            log::warn!("Ignoring invalid value {value:?} for option '{key}'");
        }
    }

    fn set_escape_inside(&mut self, value: OptionValue<'_>) -> bool {
        match value {
            OptionValue::Text(text) if text.is_empty() => {
                self.escape_inside = None;
                true
            }
            OptionValue::Text(text) => {
                self.escape_inside = EscapePair::parse(text);
                self.escape_inside.is_some()
            }
            OptionValue::Flag => false,
        }
    }
}

/// Split `a=1, b , c = x` into `[("a", Text("1")), ("b", Flag), ("c", Text("x"))]`.
///
/// Entries with an empty key, an empty value or more than one `=` are dropped.
pub fn parse_option_string(text: &str) -> Vec<(&str, OptionValue<'_>)> {
    text.split(',')
        .filter_map(|entry| {
            let parts: Vec<&str> = entry.split('=').map(str::trim).collect();
            match parts.as_slice() {
                [key] if !key.is_empty() => Some((*key, OptionValue::Flag)),
                [key, value] if !key.is_empty() && !value.is_empty() => {
                    Some((*key, OptionValue::Text(*value)))
                }
                _ => None,
            }
        })
        .collect()
}

/// `true`, `yes`, `T`... are true; anything else is false. A bare key is true.
pub fn parse_bool(value: OptionValue<'_>) -> bool {
    match value {
        OptionValue::Flag => true,
        OptionValue::Text(text) => text.trim_start().starts_with(['t', 'T', 'y', 'Y']),
    }
}

fn set_string(field: &mut String, value: OptionValue<'_>) -> bool {
    match value {
        OptionValue::Text(text) if !text.is_empty() => {
            *field = text.to_string();
            true
        }
        _ => false,
    }
}

fn set_bool(field: &mut bool, value: OptionValue<'_>) -> bool {
    *field = parse_bool(value);
    true
}

fn parse_magnitude(value: OptionValue<'_>) -> Option<u64> {
    match value {
        OptionValue::Text(text) => text.trim().parse::<i64>().ok().map(i64::unsigned_abs),
        OptionValue::Flag => None,
    }
}

fn set_count(field: &mut usize, value: OptionValue<'_>) -> bool {
    match parse_magnitude(value).and_then(|n| usize::try_from(n).ok()) {
        Some(n) => {
            *field = n;
            true
        }
        None => false,
    }
}

fn set_number(field: &mut u32, value: OptionValue<'_>, min: u32) -> bool {
    match parse_magnitude(value).and_then(|n| u32::try_from(n).ok()) {
        Some(n) if n >= min => {
            *field = n;
            true
        }
        _ => false,
    }
}
