//! Whole-document and single-snippet conversion.

use std::path::PathBuf;

use crate::cache::{CachedArtifact, ContentCache, Digest, fragment, fragment_body};
use crate::error::{Diagnostic, RenderError};
use crate::extract::{Extractor, RawBlock};
use crate::options::OptionSet;
use crate::render::template::{self, POSTAMBLE, PREAMBLE};
use crate::render::{render, resolve_style};
use crate::style::{Style, wrap_style};

/// Result of converting a document.
#[derive(Debug, Default)]
pub struct ConversionReport {
    /// Macro definitions for every block that rendered.
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
    pub rendered: usize,
    pub reused: usize,
    /// Whether a malformed block tag ended the scan early.
    pub aborted: bool,
}

impl ConversionReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Files produced for one snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetOutcome {
    pub style_name: &'static str,
    pub style: CachedArtifact,
    pub artifact: CachedArtifact,
    pub shown_numbers: Vec<u32>,
}

impl SnippetOutcome {
    /// Typesetter instructions to load the style and the artifact.
    pub fn callback(&self) -> String {
        template::tex_callback(
            &self.style.path,
            &self.artifact.path,
            self.style_name,
            self.artifact.was_cached,
        )
    }
}

struct BlockOutput {
    style: &'static Style,
    artifact: String,
    was_cached: bool,
}

/// Renders blocks through a shared cache.
pub struct Converter {
    baseline: OptionSet,
    extractor: Extractor,
    cache: ContentCache,
    base_dir: PathBuf,
}

impl Converter {
    /// `baseline` holds the document defaults; file references in input
    /// blocks are resolved against `base_dir`.
    pub fn new(
        baseline: OptionSet,
        extractor: Extractor,
        cache: ContentCache,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            baseline,
            extractor,
            cache,
            base_dir: base_dir.into(),
        }
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    /// Convert every block of `document`.
    ///
    /// Blocks that fail are left out and reported; a malformed block tag
    /// stops the conversion, keeping what was produced before it.
    pub fn convert(&self, document: &str) -> ConversionReport {
        let mut report = ConversionReport {
            output: PREAMBLE.to_string(),
            ..ConversionReport::default()
        };
        let mut styles: Vec<&'static str> = Vec::new();

        for block in self.extractor.blocks(document) {
            let raw = match block {
                Ok(raw) => raw,
                Err(error) => {
                    log::error!("Stopping conversion: {error}");
                    report.diagnostics.push(Diagnostic { block: None, error });
                    report.aborted = true;
                    break;
                }
            };

            log::debug!("Block {} ({}) at byte {}", raw.id, raw.kind, raw.offset);
            match self.convert_block(&raw) {
                Ok(block) => {
                    if !styles.contains(&block.style.name) {
                        styles.push(block.style.name);
                        report.output.push_str(&wrap_style(block.style));
                    }
                    report
                        .output
                        .push_str(&template::document_entry(raw.id_text, &block.artifact));
                    if block.was_cached {
                        report.reused += 1;
                    } else {
                        report.rendered += 1;
                    }
                }
                Err(error) => {
                    log::warn!("Skipping block {}: {error}", raw.id);
                    report.diagnostics.push(Diagnostic {
                        block: Some(raw.id),
                        error,
                    });
                }
            }
        }

        report.output.push_str(POSTAMBLE);
        report
    }

    fn convert_block(&self, raw: &RawBlock<'_>) -> Result<BlockOutput, RenderError> {
        let options = raw.resolve_options(&self.baseline);
        let text = raw.source_text(&options, &self.base_dir)?;
        let style = resolve_style(&options)?;

        let digest = Digest::of(&text, &options);
        let cached = self.cache.get_or_render(&digest, || {
            render(&text, &options).map(|snippet| fragment(&snippet.artifact))
        })?;
        let contents = self.cache.read(&cached)?;

        Ok(BlockOutput {
            style,
            artifact: fragment_body(&contents).to_string(),
            was_cached: cached.was_cached,
        })
    }

    /// Render one snippet to its own artifact file and store its style.
    pub fn snippet(&self, text: &str, options: &OptionSet) -> Result<SnippetOutcome, RenderError> {
        let style = resolve_style(options)?;
        let digest = Digest::of(text, options);

        let mut fresh_numbers = None;
        let artifact = self.cache.get_or_render(&digest, || {
            let snippet = render(text, options)?;
            fresh_numbers = Some(snippet.block.shown_numbers());
            Ok(fragment(&snippet.artifact))
        })?;
        let shown_numbers = match fresh_numbers {
            Some(numbers) => numbers,
            None => template::recorded_numbers(&self.cache.read(&artifact)?),
        };

        if artifact.was_cached {
            log::info!("Already available: {}", artifact.path.display());
        }
        let style_file = self.cache.store_style(style)?;

        Ok(SnippetOutcome {
            style_name: style.name,
            style: style_file,
            artifact,
            shown_numbers,
        })
    }
}
