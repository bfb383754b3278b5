//! A streaming, incremental Unicode reader/decoder.
//!
//! `utfmodem` sits at the front of a text-format parser. It pulls raw bytes
//! from a [`PullSource`], fixes the stream encoding from its byte order mark
//! (UTF-8, UTF-16LE, or UTF-16BE; a stream without a BOM is read as UTF-8),
//! validates and decodes characters incrementally, and normalizes every
//! character into a single canonical UTF-8 buffer that a downstream scanner
//! consumes on demand.
//!
//! The reader never loses or re-reads a partial multi-byte sequence: a
//! sequence cut off by the end of a fill is carried over and completed by the
//! next one, while a sequence cut off by the end of the *stream* is a hard
//! error. Malformed input (overlong UTF-8, stray continuation bytes, broken
//! surrogate pairs, codepoints outside the allowed character ranges) always
//! halts decoding with the exact byte offset of the offense; nothing is ever
//! replaced or skipped.
//!
//! # Example
//!
//! ```
//! use utfmodem::StreamingReader;
//!
//! // UTF-16LE input: a byte order mark, then "hi".
//! let input: &[u8] = &[0xFF, 0xFE, 0x68, 0x00, 0x69, 0x00];
//! let mut reader = StreamingReader::new(input);
//!
//! reader.ensure(2)?;
//! assert!(reader.buffered().starts_with(b"hi"));
//! reader.advance(2);
//! # Ok::<(), utfmodem::ReaderError>(())
//! ```
//!
//! After the source reports end of stream, the decoded buffer ends with a
//! single `\0` sentinel so the consumer can detect end-of-input without a
//! separate flag check on every read.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod decoder;
mod encoding;
mod error;
mod reader;
mod source;

#[cfg(test)]
mod tests;

pub use encoding::Encoding;
pub use error::{DecodeErrorKind, ReaderError, ReaderErrorKind};
pub use reader::{ReaderOptions, StreamingReader};
pub use source::{PullSource, SourceError};
