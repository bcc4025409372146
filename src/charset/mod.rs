//! Legacy text encodings to UTF-8.
//!
//! # Responsibilities
//! - Resolve encoding labels (`GBK`, `Shift_JIS`, `ISO-8859-1`, ...)
//! - Guess the encoding of unlabeled bytes
//! - Rewrite a legacy-encoded file as UTF-8 in place
//!
//! # Design Decisions
//! - Labels follow the WHATWG registry, so `ISO-8859-1` and `latin1` decode
//!   as windows-1252 and `GB2312` as GBK
//! - Malformed input is an error, never silently replaced

use std::path::Path;

use encoding_rs::{Encoding, BIG5, EUC_KR, GBK, SHIFT_JIS, UTF_8, WINDOWS_1252};
use thiserror::Error;

use crate::files::{self, FileError};

/// Bytes inspected when guessing a file's encoding.
const DETECTION_SAMPLE: usize = 4096;

/// Encodings `file_to_utf8` will rewrite.
fn rewritable(encoding: &'static Encoding) -> bool {
    [GBK, BIG5, SHIFT_JIS, EUC_KR, WINDOWS_1252].contains(&encoding)
}

#[derive(Debug, Error)]
pub enum CharsetError {
    #[error("unsupported encoding: {0}")]
    Unsupported(String),

    #[error("input is not valid {0}")]
    Malformed(&'static str),

    #[error(transparent)]
    File(#[from] FileError),
}

/// Look up an encoding by label, case-insensitively.
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Guess the encoding of `data` from at most its first 4 KiB.
pub fn detect(data: &[u8]) -> &'static Encoding {
    if std::str::from_utf8(data).is_ok() {
        return UTF_8;
    }
    let sample = &data[..data.len().min(DETECTION_SAMPLE)];
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(sample, sample.len() == data.len());
    detector.guess(None, true)
}

/// Decode `data` to UTF-8.
///
/// With `auto_detect` the source encoding is guessed and `source` is
/// ignored; otherwise `source` names it. A leading BOM for the source
/// encoding is dropped.
pub fn convert(data: &[u8], source: &str, auto_detect: bool) -> Result<String, CharsetError> {
    let encoding = if auto_detect {
        detect(data)
    } else {
        encoding_for_label(source).ok_or_else(|| CharsetError::Unsupported(source.to_string()))?
    };
    decode(encoding, data)
}

/// Rewrite a GBK, Big5, Shift_JIS, EUC-KR or Western (Latin-1,
/// windows-1252) file as UTF-8.
///
/// Returns the detected encoding, or `None` when the file was already UTF-8
/// and left untouched.
pub fn file_to_utf8(path: impl AsRef<Path>) -> Result<Option<&'static Encoding>, CharsetError> {
    let path = path.as_ref();
    let data = files::read_bytes(path)?;

    let encoding = detect(&data);
    if encoding == UTF_8 {
        tracing::debug!(path = %path.display(), "File is already UTF-8");
        return Ok(None);
    }
    if !rewritable(encoding) {
        return Err(CharsetError::Unsupported(encoding.name().to_string()));
    }

    let text = decode(encoding, &data)?;
    files::write_bytes(path, text)?;
    tracing::info!(
        path = %path.display(),
        encoding = encoding.name(),
        "Converted file to UTF-8"
    );
    Ok(Some(encoding))
}

fn decode(encoding: &'static Encoding, data: &[u8]) -> Result<String, CharsetError> {
    let (text, malformed) = encoding.decode_with_bom_removal(data);
    if malformed {
        return Err(CharsetError::Malformed(encoding.name()));
    }
    Ok(text.into_owned())
}
