//! Color styles and their macro definitions.
//!
//! A [`Style`] assigns display rules to token kinds. Kinds with a rule are
//! tagged with their short class name (`k`, `c1`, ...); kinds without one
//! fall back to a generic name. The macro fragment produced by
//! [`style_definitions`] defines `\PY`, which typesets a run given its
//! `+`-joined class names.

use std::fmt::Write;

use tintex_syntax::SyntaxKind;

use crate::render::formatter::TEX_ESCAPES;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// `r,g,b` with components scaled to `0.00..=1.00`, as `xcolor` expects.
    pub fn to_tex(self) -> String {
        let Rgb(r, g, b) = self;
        format!(
            "{:.2},{:.2},{:.2}",
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0
        )
    }
}

/// How runs of one token kind are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRule {
    pub color: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub border: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl StyleRule {
    pub const PLAIN: StyleRule = StyleRule {
        color: None,
        bg: None,
        border: None,
        bold: false,
        italic: false,
        underline: false,
    };

    const fn fg(hex: u32) -> Self {
        StyleRule {
            color: Some(Rgb::from_hex(hex)),
            ..Self::PLAIN
        }
    }

    const fn boxed(hex: u32) -> Self {
        StyleRule {
            border: Some(Rgb::from_hex(hex)),
            ..Self::PLAIN
        }
    }

    const fn bold(self) -> Self {
        StyleRule { bold: true, ..self }
    }

    const fn italic(self) -> Self {
        StyleRule {
            italic: true,
            ..self
        }
    }

    /// Body of the `\PY@tok@<class>` macro.
    fn tex_command(&self) -> String {
        let mut command = String::new();
        if self.bold {
            command.push_str(r"\let\PY@bf=\textbf");
        }
        if self.italic {
            command.push_str(r"\let\PY@it=\textit");
        }
        if self.underline {
            command.push_str(r"\let\PY@ul=\underline");
        }
        if let Some(color) = self.color {
            let _ = write!(
                command,
                r"\def\PY@tc##1{{\textcolor[rgb]{{{}}}{{##1}}}}",
                color.to_tex()
            );
        }
        let background = self.bg.map_or_else(|| "1,1,1".to_string(), Rgb::to_tex);
        if let Some(border) = self.border {
            let _ = write!(
                command,
                r"\def\PY@bc##1{{{{\setlength{{\fboxsep}}{{\string -\fboxrule}}\fcolorbox[rgb]{{{}}}{{{background}}}{{\strut ##1}}}}}}",
                border.to_tex()
            );
        } else if self.bg.is_some() {
            let _ = write!(
                command,
                r"\def\PY@bc##1{{{{\setlength{{\fboxsep}}{{0pt}}\colorbox[rgb]{{{background}}}{{\strut ##1}}}}}}"
            );
        }
        command
    }
}

/// A named set of rules.
#[derive(Debug)]
pub struct Style {
    pub name: &'static str,
    rules: &'static [(SyntaxKind, StyleRule)],
}

impl Style {
    pub fn rule(&self, kind: SyntaxKind) -> Option<&StyleRule> {
        self.rules
            .iter()
            .find(|(ruled, _)| *ruled == kind)
            .map(|(_, rule)| rule)
    }

    /// Class name of a single level of the kind hierarchy.
    pub fn class_name(&self, kind: SyntaxKind) -> &'static str {
        if self.rule(kind).is_some() {
            kind.short_name()
        } else {
            kind.generic_name()
        }
    }

    /// Root-first class names of `kind` and its ancestors, joined with `+`.
    pub fn style_class(&self, kind: SyntaxKind) -> String {
        kind.chain()
            .iter()
            .map(|level| self.class_name(*level))
            .collect::<Vec<_>>()
            .join("+")
    }
}

static DEFAULT: Style = Style {
    name: "default",
    rules: &[
        (SyntaxKind::TEXT, StyleRule::PLAIN),
        (SyntaxKind::ERROR, StyleRule::boxed(0xFF0000)),
        (SyntaxKind::KEYWORD, StyleRule::fg(0x008000).bold()),
        (SyntaxKind::KEYWORD_CONSTANT, StyleRule::fg(0x008000).bold()),
        (SyntaxKind::KEYWORD_TYPE, StyleRule::fg(0xB00040)),
        (SyntaxKind::NAME_BUILTIN, StyleRule::fg(0x008000)),
        (SyntaxKind::NAME_FUNCTION, StyleRule::fg(0x0000FF)),
        (SyntaxKind::NAME_CLASS, StyleRule::fg(0x0000FF).bold()),
        (SyntaxKind::NAME_DECORATOR, StyleRule::fg(0xAA22FF)),
        (SyntaxKind::STRING, StyleRule::fg(0xBA2121)),
        (SyntaxKind::STRING_CHAR, StyleRule::fg(0xBA2121)),
        (SyntaxKind::STRING_DOC, StyleRule::fg(0xBA2121).italic()),
        (SyntaxKind::STRING_ESCAPE, StyleRule::fg(0xAA5D1F).bold()),
        (SyntaxKind::NUMBER, StyleRule::fg(0x666666)),
        (SyntaxKind::OPERATOR, StyleRule::fg(0x666666)),
        (SyntaxKind::COMMENT, StyleRule::fg(0x3D7B7B).italic()),
        (SyntaxKind::COMMENT_SINGLE, StyleRule::fg(0x3D7B7B).italic()),
        (SyntaxKind::COMMENT_MULTILINE, StyleRule::fg(0x3D7B7B).italic()),
        (SyntaxKind::COMMENT_PREPROC, StyleRule::fg(0x9C6500)),
    ],
};

static BW: Style = Style {
    name: "bw",
    rules: &[
        (SyntaxKind::TEXT, StyleRule::PLAIN),
        (SyntaxKind::ERROR, StyleRule::boxed(0xFF0000)),
        (SyntaxKind::KEYWORD, StyleRule::PLAIN.bold()),
        (SyntaxKind::KEYWORD_TYPE, StyleRule::PLAIN),
        (SyntaxKind::NAME_CLASS, StyleRule::PLAIN.bold()),
        (SyntaxKind::STRING, StyleRule::PLAIN.italic()),
        (SyntaxKind::STRING_ESCAPE, StyleRule::PLAIN.bold()),
        (SyntaxKind::COMMENT, StyleRule::PLAIN.italic()),
        (SyntaxKind::COMMENT_PREPROC, StyleRule::PLAIN),
    ],
};

static STYLES: &[&Style] = &[&DEFAULT, &BW];

/// Find a built-in style by name.
pub fn lookup(name: &str) -> Option<&'static Style> {
    STYLES.iter().copied().find(|style| style.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    STYLES.iter().map(|style| style.name)
}

const HELPERS: &str = r"\def\PY@reset{\let\PY@it=\relax \let\PY@bf=\relax%
    \let\PY@ul=\relax \let\PY@tc=\relax%
    \let\PY@bc=\relax \let\PY@ff=\relax}
\def\PY@tok#1{\csname PY@tok@#1\endcsname}
\def\PY@toks#1+{\ifx\relax#1\empty\else%
    \PY@tok{#1}\expandafter\PY@toks\fi}
\def\PY@do#1{\PY@bc{\PY@tc{\PY@ul{%
    \PY@it{\PY@bf{\PY@ff{#1}}}}}}}
\def\PY#1#2{\PY@reset\PY@toks#1+\relax+\PY@do{#2}}
";

/// Macro definitions for typesetting runs tagged with `style`'s classes.
///
/// Expects `@` to be a letter, as it is between the document preamble and
/// postamble.
pub fn style_definitions(style: &Style) -> String {
    let mut defs = String::from(HELPERS);
    defs.push('\n');

    for (kind, rule) in style.rules {
        let _ = writeln!(
            defs,
            r"\@namedef{{PY@tok@{}}}{{{}}}",
            kind.short_name(),
            rule.tex_command()
        );
    }
    defs.push('\n');

    for (ch, name) in TEX_ESCAPES {
        let _ = writeln!(defs, r"\def\PY{name}{{\char`\{ch}}}");
    }
    defs
}

/// Package the definitions as the body of `\PYstyle<name>`.
///
/// Parameter characters are doubled, except in the `\#` character macro, and
/// every line ends with `%` so no spurious spaces reach the output.
pub fn wrap_style(style: &Style) -> String {
    let defs = style_definitions(style)
        .replace('#', "##")
        .replace(r"\##", r"\#")
        .replace('\n', "%\n");
    format!("\\def\\PYstyle{}{{%\n{defs}%\n}}%\n", style.name)
}
