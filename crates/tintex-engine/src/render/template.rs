//! Macro templates around rendered snippets.

use std::path::Path;

use super::lines::RenderedBlock;
use crate::options::OutputMode;

pub const PREAMBLE: &str = "% -*- mode: latex -*-\n\\makeatletter\n";
pub const POSTAMBLE: &str = "\\makeatother\n";

/// The snippet artifact: stores the colored block in `NLN/colored`.
///
/// Carries no block identifier, so identical snippets share one artifact.
pub fn snippet(block: &RenderedBlock, mode: OutputMode, lineno_sep: &str) -> String {
    let numbers = block
        .shown_numbers()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let body = block.numbered_markup().join("\\newline\n");
    let mode = mode.as_str();

    format!(
        "\\tl_set:cn {{NLN/colored}} {{%\n  \\group_begin:\n  \\NLN@do@linenos:nn{{{lineno_sep}}}{{{numbers}}}%\n  \\begin{{NLN/colored/{mode}}}%\n  {body}%\n  \\end{{NLN/colored/{mode}}}%\n  \\group_end:\n}}\n"
    )
}

/// Bind an artifact to a block of a document.
pub fn document_entry(id: &str, artifact: &str) -> String {
    format!("\\NLN@snippet:nn {{{id}}} {{%\n{artifact}}}%\n")
}

/// Numbers recorded in an artifact's `\NLN@do@linenos:nn` header.
pub fn recorded_numbers(artifact: &str) -> Vec<u32> {
    let Some(start) = artifact.find("\\NLN@do@linenos:nn{") else {
        return Vec::new();
    };
    let rest = &artifact[start..];
    let numbers = rest
        .split_once("}{")
        .and_then(|(_, tail)| tail.split_once('}'))
        .map_or("", |(numbers, _)| numbers);

    numbers
        .split(',')
        .filter_map(|n| n.trim().parse().ok())
        .collect()
}

/// Instructions for the typesetter to load a style fragment and an artifact.
pub fn tex_callback(style_path: &Path, artifact_path: &Path, style: &str, reused: bool) -> String {
    format!(
        "%\n\\NLN_remove:n {{colored:}}%\n\\NLN_style:nn {{\\tl_to_str:n {{{}}}}}{{\\tl_to_str:n{{{style}}}}}%\n\\input {{\\tl_to_str:n {{{}}}}}%\n\\NLN:nn {{cached:}} {{{reused}}}%\n\\NLN:n {{colored:}}%\n",
        style_path.display(),
        artifact_path.display(),
    )
}
