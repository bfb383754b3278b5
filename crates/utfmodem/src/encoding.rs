//! Stream encoding detection from the byte order mark.

/// The character encoding of the raw input stream.
///
/// Fixed exactly once, at stream offset 0, before any character is decoded.
/// A stream that starts with none of the recognized byte order marks is read
/// as UTF-8; there is no heuristic sniffing beyond the explicit marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8, with or without a leading `EF BB BF` mark.
    Utf8,
    /// UTF-16 little-endian, marked by a leading `FF FE`.
    Utf16Le,
    /// UTF-16 big-endian, marked by a leading `FE FF`.
    Utf16Be,
}

const BOM_UTF8: [u8; 3] = [0xEF, 0xBB, 0xBF];
const BOM_UTF16LE: [u8; 2] = [0xFF, 0xFE];
const BOM_UTF16BE: [u8; 2] = [0xFE, 0xFF];

impl Encoding {
    /// How many leading bytes detection wants to see. A stream shorter than
    /// this is still detected from whatever is available.
    pub(crate) const DETECT_LEN: usize = 3;

    /// Detects the stream encoding from its first bytes, returning the
    /// encoding and the number of mark bytes to strip. First match wins.
    pub(crate) fn detect(prefix: &[u8]) -> (Encoding, usize) {
        if prefix.starts_with(&BOM_UTF16LE) {
            (Encoding::Utf16Le, BOM_UTF16LE.len())
        } else if prefix.starts_with(&BOM_UTF16BE) {
            (Encoding::Utf16Be, BOM_UTF16BE.len())
        } else if prefix.starts_with(&BOM_UTF8) {
            (Encoding::Utf8, BOM_UTF8.len())
        } else {
            (Encoding::Utf8, 0)
        }
    }
}
