//! Text versus binary detection from a file's leading bytes.
//!
//! Only the first [`SNIFF_LEN`] bytes are ever inspected. The decision is
//! made from byte-order marks, markup signatures, a table of binary magic
//! numbers and finally a scan for control bytes that never appear in text.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::error::CoreError;

/// Number of leading bytes inspected per file.
pub const SNIFF_LEN: usize = 512;

const TEXT_BOMS: &[&[u8]] = &[
    b"\xEF\xBB\xBF", // UTF-8
    b"\xFE\xFF",     // UTF-16 BE
    b"\xFF\xFE",     // UTF-16 LE
];

/// Markup openers, matched case-insensitively after leading whitespace.
const MARKUP_SIGNATURES: &[&[u8]] = &[
    b"<!DOCTYPE HTML",
    b"<HTML",
    b"<HEAD",
    b"<SCRIPT",
    b"<IFRAME",
    b"<H1",
    b"<DIV",
    b"<FONT",
    b"<TABLE",
    b"<A",
    b"<STYLE",
    b"<TITLE",
    b"<B",
    b"<BODY",
    b"<BR",
    b"<P",
    b"<!--",
    b"<?XML",
];

/// Magic numbers of common binary formats, matched at offset 0.
///
/// Purely printable magics such as BMP's `BM` are not listed here; those
/// formats fall through to the control byte scan.
const BINARY_MAGIC: &[&[u8]] = &[
    b"%PDF-",
    b"%!PS-Adobe-",
    b"\x89PNG\r\n\x1A\n",
    b"GIF87a",
    b"GIF89a",
    b"\xFF\xD8\xFF",       // JPEG
    b"\x00\x00\x01\x00",   // ICO
    b"\x00\x00\x02\x00",   // CUR
    b"OggS\x00",
    b"\x1A\x45\xDF\xA3",   // Matroska / WebM
    b"PK\x03\x04",         // ZIP, JAR, DOCX
    b"\x1F\x8B\x08",       // GZIP
    b"Rar!\x1A\x07",
    b"7z\xBC\xAF\x27\x1C",
    b"\xFD7zXZ\x00",
    b"\x7FELF",
    b"\xFE\xED\xFA\xCE",   // Mach-O 32
    b"\xFE\xED\xFA\xCF",   // Mach-O 64
    b"\xCF\xFA\xED\xFE",
    b"\xCE\xFA\xED\xFE",
    b"\xCA\xFE\xBA\xBE",   // Mach-O fat / Java class
    b"\x00asm",            // WebAssembly
    b"\x00\x01\x00\x00\x00", // TrueType
    b"SQLite format 3\x00",
];

/// Decides whether a byte prefix looks like text.
///
/// Empty input counts as text.
pub fn is_text_content(prefix: &[u8]) -> bool {
    let data = &prefix[..prefix.len().min(SNIFF_LEN)];
    if data.is_empty() {
        return true;
    }

    if TEXT_BOMS.iter().any(|bom| data.starts_with(bom)) {
        return true;
    }

    let trimmed = skip_leading_whitespace(data);
    if MARKUP_SIGNATURES
        .iter()
        .any(|sig| matches_markup_signature(trimmed, sig))
    {
        return true;
    }

    if BINARY_MAGIC.iter().any(|magic| data.starts_with(magic)) {
        return false;
    }

    // MP4 and friends carry their tag at offset 4.
    if data.len() >= 12 && &data[4..8] == b"ftyp" {
        return false;
    }

    !data.iter().copied().any(is_binary_data_byte)
}

/// Reads the prefix of `path` and applies [`is_text_content`].
pub fn is_text_file(path: &Path) -> Result<bool, CoreError> {
    let file = File::open(path).map_err(|e| CoreError::io(e, path))?;
    let mut buffer = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64)
        .read_to_end(&mut buffer)
        .map_err(|e| CoreError::io(e, path))?;

    let is_text = is_text_content(&buffer);
    tracing::debug!(
        "Sniffed {} bytes of {}: {}",
        buffer.len(),
        path.display(),
        if is_text { "text" } else { "binary" }
    );
    Ok(is_text)
}

fn skip_leading_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|&b| !matches!(b, b'\t' | b'\n' | 0x0C | b'\r' | b' '))
        .unwrap_or(data.len());
    &data[start..]
}

/// A markup signature must be followed by a space or `>` to count.
fn matches_markup_signature(data: &[u8], sig: &[u8]) -> bool {
    if data.len() <= sig.len() {
        return false;
    }
    let head_matches = data
        .iter()
        .zip(sig)
        .all(|(d, s)| d.to_ascii_uppercase() == *s);
    head_matches && matches!(data[sig.len()], b' ' | b'>')
}

fn is_binary_data_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}
