//! Content-addressed artifact cache.
//!
//! Artifacts live in one directory, named by a SHA-256 digest of the snippet
//! text and its canonical options. An artifact is never modified once
//! written; a render with the same inputs finds the existing file and skips
//! rendering. Files are written to a temporary file in the same directory
//! and renamed into place, so concurrent readers never see partial content.

use sha2::{Digest as _, Sha256};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::RenderError;
use crate::options::OptionSet;
use crate::render::template::{POSTAMBLE, PREAMBLE};
use crate::style::{Style, wrap_style};

/// Hex digest of a snippet's render inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    /// Digest of `text` with normalized line endings and `options`.
    pub fn of(text: &str, options: &OptionSet) -> Self {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        hasher.update([0u8]);
        hasher.update(options.canonical().as_bytes());
        Digest(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where an artifact is and whether it was already there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedArtifact {
    pub path: PathBuf,
    pub was_cached: bool,
}

#[derive(Debug, Clone)]
pub struct ContentCache {
    dir: PathBuf,
    enabled: bool,
}

impl ContentCache {
    /// A cache in `dir`. When disabled, every lookup renders and overwrites.
    pub fn new(dir: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            enabled,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn artifact_path(&self, digest: &Digest) -> PathBuf {
        self.dir.join(format!("{digest}.pyg.tex"))
    }

    pub fn style_path(&self, style_name: &str) -> PathBuf {
        self.dir.join(format!("{style_name}.pyg.sty"))
    }

    /// Return the artifact for `digest`, rendering and storing it first if
    /// needed. `render` is not called on a hit.
    pub fn get_or_render<F>(&self, digest: &Digest, render: F) -> Result<CachedArtifact, RenderError>
    where
        F: FnOnce() -> Result<String, RenderError>,
    {
        let path = self.artifact_path(digest);
        self.lookup_or_store(path, render)
    }

    /// Store the macro definitions of `style` unless they are already cached.
    pub fn store_style(&self, style: &Style) -> Result<CachedArtifact, RenderError> {
        let path = self.style_path(style.name);
        self.lookup_or_store(path, || Ok(fragment(&wrap_style(style))))
    }

    /// Read a stored artifact.
    pub fn read(&self, artifact: &CachedArtifact) -> Result<String, RenderError> {
        fs::read_to_string(&artifact.path).map_err(|source| RenderError::Cache {
            path: artifact.path.clone(),
            source,
        })
    }

    fn lookup_or_store<F>(&self, path: PathBuf, render: F) -> Result<CachedArtifact, RenderError>
    where
        F: FnOnce() -> Result<String, RenderError>,
    {
        if self.enabled && path.is_file() {
            log::debug!("Cache hit: {}", path.display());
            return Ok(CachedArtifact {
                path,
                was_cached: true,
            });
        }

        let contents = render()?;
        persist(&path, &contents).map_err(|source| RenderError::Cache {
            path: path.clone(),
            source,
        })?;
        log::debug!("Cache store: {}", path.display());

        Ok(CachedArtifact {
            path,
            was_cached: false,
        })
    }
}

/// A self-contained file: `@` is a letter between preamble and postamble.
pub fn fragment(body: &str) -> String {
    format!("{PREAMBLE}{body}{POSTAMBLE}")
}

/// The body of a file written by [`fragment`].
pub fn fragment_body(contents: &str) -> &str {
    let body = contents.strip_prefix(PREAMBLE).unwrap_or(contents);
    body.strip_suffix(POSTAMBLE).unwrap_or(body)
}

fn persist(path: &Path, contents: &str) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}
