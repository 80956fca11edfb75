//! Reading referenced source files.

use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{path} is not valid {encoding}")]
    Decode { path: PathBuf, encoding: String },
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),
}

/// How [`read_source`] decodes a file. A byte order mark always wins over
/// the declared encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Any WHATWG label, e.g. `utf-8`, `cp1252`, `koi8-r` or `utf-16le`.
    Declared(&'static encoding_rs::Encoding),
    /// UTF-8 if the bytes are valid UTF-8, Latin-1 otherwise.
    Guess,
}

impl Encoding {
    pub fn from_label(label: &str) -> Result<Self, IoError> {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("guess") {
            return Ok(Encoding::Guess);
        }
        // Also accept spellings such as `latin-1` or `utf_8`.
        let squeezed: String = trimmed.chars().filter(|&c| !matches!(c, '-' | '_')).collect();
        encoding_rs::Encoding::for_label_no_replacement(trimmed.as_bytes())
            .or_else(|| encoding_rs::Encoding::for_label_no_replacement(squeezed.as_bytes()))
            .map(Encoding::Declared)
            .ok_or_else(|| IoError::UnsupportedEncoding(label.to_string()))
    }

    fn label(self) -> &'static str {
        match self {
            Encoding::Declared(encoding) => encoding.name(),
            Encoding::Guess => "guess",
        }
    }
}

/// Where a file reference points. Absolute names are used as they are,
/// relative names are resolved against `base_dir`.
pub fn resolve_reference(name: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        RelativePath::new(name).to_path(base_dir)
    }
}

/// Read and decode a source file.
pub fn read_source(path: &Path, encoding: Encoding) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    decode(&bytes, encoding).ok_or_else(|| IoError::Decode {
        path: path.to_path_buf(),
        encoding: encoding.label().to_string(),
    })
}

/// Decode `bytes`, or `None` if they are not valid in `encoding`.
pub fn decode(bytes: &[u8], encoding: Encoding) -> Option<String> {
    if let Some((found, bom_length)) = encoding_rs::Encoding::for_bom(bytes) {
        return strict_decode(found, &bytes[bom_length..]);
    }
    match encoding {
        Encoding::Declared(declared) => strict_decode(declared, bytes),
        Encoding::Guess => strict_decode(encoding_rs::UTF_8, bytes)
            .or_else(|| Some(bytes.iter().map(|&b| char::from(b)).collect())),
    }
}

fn strict_decode(encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("utf-8", "UTF-8")]
    #[case("UTF8", "UTF-8")]
    #[case("latin-1", "windows-1252")]
    #[case("iso-8859-1", "windows-1252")]
    #[case("cp1252", "windows-1252")]
    #[case("koi8-r", "KOI8-R")]
    #[case("utf-16", "UTF-16LE")]
    #[case("shift_jis", "Shift_JIS")]
    fn encoding_labels(#[case] label: &str, #[case] expected: &str) {
        let Encoding::Declared(encoding) = Encoding::from_label(label).unwrap() else {
            panic!("{label} should name an encoding");
        };
        assert_eq!(encoding.name(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("guess")]
    #[case(" GUESS ")]
    fn guess_labels(#[case] label: &str) {
        assert_eq!(Encoding::from_label(label).unwrap(), Encoding::Guess);
    }

    #[test]
    fn unsupported_encoding_label() {
        assert!(matches!(
            Encoding::from_label("ebcdic"),
            Err(IoError::UnsupportedEncoding(label)) if label == "ebcdic"
        ));
    }

    #[test]
    fn guess_prefers_utf8_and_drops_bom() {
        let bytes = "\u{feff}café".as_bytes();
        assert_eq!(decode(bytes, Encoding::Guess).unwrap(), "café");
    }

    #[test]
    fn guess_falls_back_to_latin1() {
        assert_eq!(decode(&[b'c', b'a', b'f', 0xE9], Encoding::Guess).unwrap(), "café");
    }

    #[test]
    fn declared_single_byte_encodings() {
        let cp1252 = Encoding::from_label("cp1252").unwrap();
        assert_eq!(decode(&[0x80, b'5'], cp1252).unwrap(), "€5");

        let koi8 = Encoding::from_label("koi8-r").unwrap();
        assert_eq!(decode(&[0xD0, 0xD2, 0xC9], koi8).unwrap(), "при");
    }

    #[test]
    fn byte_order_mark_overrides_declared_encoding() {
        let latin1 = Encoding::from_label("latin-1").unwrap();
        let bytes = [0xFF, 0xFE, b'h', 0x00, b'i', 0x00];
        assert_eq!(decode(&bytes, latin1).unwrap(), "hi");
    }

    #[test]
    fn declared_utf16_without_bom() {
        let utf16 = Encoding::from_label("utf-16be").unwrap();
        assert_eq!(decode(&[0x00, b'o', 0x00, b'k'], utf16).unwrap(), "ok");
    }

    #[test]
    fn strict_encodings_reject_invalid_bytes() {
        let utf8 = Encoding::from_label("utf-8").unwrap();
        assert_eq!(decode(&[0xE9], utf8), None);
    }

    #[test]
    fn read_relative_reference() {
        // Given a directory with a source file
        let dir = create_test_dir();
        create_test_file(&dir, "code/main.c", "int main;\n");

        // When resolving a relative reference against it
        let path = resolve_reference("code/main.c", dir.path());

        // Then the file is read from the directory
        assert_eq!(read_source(&path, Encoding::Guess).unwrap(), "int main;\n");
    }

    #[test]
    fn absolute_reference_is_kept() {
        let dir = create_test_dir();
        let file = create_test_file(&dir, "a.py", "x");
        let path = resolve_reference(file.to_str().unwrap(), Path::new("/elsewhere"));
        assert_eq!(path, file);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = create_test_dir();
        let path = resolve_reference("missing.c", dir.path());
        assert!(matches!(
            read_source(&path, Encoding::Guess),
            Err(IoError::NotFound(_))
        ));
    }

    #[test]
    fn undecodable_file_names_encoding() {
        let dir = create_test_dir();
        let path = dir.path().join("bin.txt");
        std::fs::write(&path, [b'a', 0xFF, 0x00]).unwrap();

        let utf8 = Encoding::from_label("utf-8").unwrap();
        let err = read_source(&path, utf8).unwrap_err();
        assert!(err.to_string().ends_with("is not valid UTF-8"));
    }
}
