// ============================================================
// Layer 4 - Text Encoding Detection
// ============================================================
// Question files come from spreadsheets saved on all sorts of
// machines, so the encoding is guessed instead of assumed:
//
//   1. a byte order mark wins (UTF-8, UTF-16LE, UTF-16BE)
//   2. otherwise chardetng guesses from the content
//
// An empty file gives nothing to guess from and is reported as
// "no encoding", like content that does not decode cleanly with
// the guessed encoding.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::domain::error::{ExamError, Result};

/// Best guess for `bytes`; None when there is nothing to go on
pub fn guess_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    if bytes.is_empty() {
        return None;
    }
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return Some(encoding);
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    Some(detector.guess(None, true))
}

/// Decode without replacement characters, dropping any BOM
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    let body = match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) if bom_encoding == encoding => &bytes[bom_len..],
        _ => bytes,
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
}

/// Read a whole text file whatever its encoding
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ExamError::FileNotFound(path.to_path_buf()),
        _ => ExamError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let encoding = guess_encoding(&bytes).ok_or_else(|| ExamError::NoEncoding(path.to_path_buf()))?;
    tracing::debug!("'{}' looks like {}", path.display(), encoding.name());

    decode(&bytes, encoding).ok_or_else(|| ExamError::NoEncoding(path.to_path_buf()))
}
