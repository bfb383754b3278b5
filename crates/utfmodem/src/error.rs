use thiserror::Error;

use crate::source::SourceError;

/// An error surfaced by [`StreamingReader::ensure`].
///
/// Every error is fatal: the byte stream is assumed unrecoverable at the
/// point of corruption, so the reader never retries internally and the
/// buffers must not be assumed further advanceable once an error is
/// returned.
///
/// [`StreamingReader::ensure`]: crate::StreamingReader::ensure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {offset}")]
pub struct ReaderError {
    kind: ReaderErrorKind,
    offset: u64,
}

impl ReaderError {
    pub(crate) fn input(source: SourceError, offset: u64) -> Self {
        Self {
            kind: ReaderErrorKind::Input(source),
            offset,
        }
    }

    pub(crate) fn decode(kind: DecodeErrorKind, offset: u64) -> Self {
        Self {
            kind: ReaderErrorKind::Decode(kind),
            offset,
        }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// Byte position in the logical stream of the offending data.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// The two failure classes of the reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderErrorKind {
    /// The source reported an I/O failure.
    #[error("input error: {0}")]
    Input(SourceError),
    /// The raw bytes do not form a valid, allowed character.
    #[error("{0}")]
    Decode(DecodeErrorKind),
}

/// Every way a raw byte sequence can fail to decode.
///
/// Variants carry the offending byte, code unit, or codepoint where one
/// exists; truncation errors have no single offending value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// The first byte of a UTF-8 sequence matches none of the four valid
    /// lead patterns.
    #[error("invalid leading UTF-8 octet 0x{0:02X}")]
    InvalidLeadingOctet(u8),
    /// A UTF-8 continuation byte does not match `10xxxxxx`.
    #[error("invalid trailing UTF-8 octet 0x{0:02X}")]
    InvalidTrailingOctet(u8),
    /// An overlong UTF-8 sequence: the value does not require its declared
    /// width.
    #[error("invalid length of a UTF-8 sequence")]
    InvalidSequenceLength,
    /// The stream ends in the middle of a UTF-8 sequence.
    #[error("incomplete UTF-8 octet sequence")]
    IncompleteUtf8Sequence,
    /// The stream ends in the middle of a UTF-16 code unit.
    #[error("incomplete UTF-16 character")]
    IncompleteUtf16Character,
    /// The stream ends after a high surrogate, before its low surrogate.
    #[error("incomplete UTF-16 surrogate pair")]
    IncompleteSurrogatePair,
    /// A UTF-8 sequence decodes to a surrogate or to a value above
    /// U+10FFFF.
    #[error("invalid Unicode character 0x{0:X}")]
    InvalidCodepoint(u32),
    /// A UTF-16 low surrogate where a lead unit was expected.
    #[error("unexpected low surrogate area 0x{0:04X}")]
    UnexpectedLowSurrogate(u16),
    /// A UTF-16 high surrogate followed by something other than a low
    /// surrogate.
    #[error("expected low surrogate area, found 0x{0:04X}")]
    ExpectedLowSurrogate(u16),
    /// A well-formed codepoint outside the allowed character ranges.
    #[error("control characters are not allowed (0x{0:02X})")]
    DisallowedCharacter(u32),
}
