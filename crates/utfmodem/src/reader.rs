//! The reader driver: refill, detect, decode, expose.

use core::fmt;

use bstr::ByteSlice;

use crate::{
    buffer::ByteBuffer,
    decoder::{self, MAX_CANONICAL_WIDTH, Step},
    encoding::Encoding,
    error::ReaderError,
    source::PullSource,
};

/// Default capacity of the raw input buffer, in bytes.
const RAW_BUFFER_SIZE: usize = 16384;

/// Default capacity of the decoded buffer. A full raw buffer of UTF-16
/// expands to at most one and a half times its size in canonical bytes, so
/// three times the raw capacity leaves room for carried-over unread output.
const BUFFER_SIZE: usize = RAW_BUFFER_SIZE * 3;

/// Configuration options for [`StreamingReader`].
///
/// Both buffers are allocated once, up front, and never grow.
#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    /// Capacity in bytes of the raw buffer filled from the source.
    ///
    /// # Default
    ///
    /// 16384
    pub raw_capacity: usize,

    /// Capacity in bytes of the decoded, canonical buffer.
    ///
    /// Must comfortably exceed `raw_capacity`: one refill round decodes the
    /// entire raw buffer, and UTF-16 input grows by up to half when
    /// re-encoded.
    ///
    /// # Default
    ///
    /// 49152 (three times the raw capacity)
    pub capacity: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            raw_capacity: RAW_BUFFER_SIZE,
            capacity: BUFFER_SIZE,
        }
    }
}

/// The incremental, encoding-aware reader.
///
/// A `StreamingReader` pulls raw bytes from its source, fixes the stream
/// encoding from the byte order mark on first use, and keeps a buffer of
/// decoded characters ready for a downstream scanner, re-encoded into
/// canonical UTF-8. See the crate docs for the overall contract.
pub struct StreamingReader<S> {
    source: S,
    /// Unconsumed raw bytes fetched from the source.
    raw: ByteBuffer,
    /// Decoded output in canonical UTF-8.
    decoded: ByteBuffer,
    /// Decoded characters not yet consumed via [`advance`].
    ///
    /// [`advance`]: StreamingReader::advance
    unread: usize,
    /// Raw bytes consumed from the start of the stream. Error locations
    /// only.
    offset: u64,
    /// Fixed on first decode; `None` until then.
    encoding: Option<Encoding>,
    /// Set the instant the source reports end of stream; never resets.
    eof: bool,
}

impl<S: PullSource> StreamingReader<S> {
    /// Creates a reader over `source` with default buffer capacities.
    pub fn new(source: S) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    /// Creates a reader over `source` with explicit buffer capacities.
    ///
    /// The raw capacity must fit the longest character sequence and the
    /// decoded capacity must exceed the raw capacity; both are caller
    /// contracts checked by debug assertions.
    pub fn with_options(source: S, options: ReaderOptions) -> Self {
        debug_assert!(
            options.raw_capacity >= MAX_CANONICAL_WIDTH,
            "raw buffer cannot hold a complete character sequence",
        );
        debug_assert!(
            options.capacity > options.raw_capacity,
            "decoded buffer must exceed the raw buffer",
        );
        Self {
            source,
            raw: ByteBuffer::with_capacity(options.raw_capacity),
            decoded: ByteBuffer::with_capacity(options.capacity),
            unread: 0,
            offset: 0,
            encoding: None,
            eof: false,
        }
    }

    /// Guarantees that at least `length` unread decoded characters are
    /// buffered. If the stream ends first, whatever could be decoded is
    /// buffered instead, followed by a single `\0` sentinel that is itself
    /// counted as one unread character.
    ///
    /// Idempotent: when the guarantee already holds this returns
    /// immediately. `length` must stay well below the decoded-buffer
    /// capacity; that is a caller contract, checked only by a debug
    /// assertion.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError`] on a source I/O failure or on the first
    /// malformed or disallowed character, positioned at the exact byte
    /// offset of the offense. Errors are fatal; the reader must not be
    /// used further after one is returned.
    pub fn ensure(&mut self, length: usize) -> Result<(), ReaderError> {
        // Worst case per refill round: the carried unread output plus a
        // full raw buffer of UTF-16 re-encoded at 3 canonical bytes per
        // 2-byte unit.
        debug_assert!(
            length.saturating_mul(MAX_CANONICAL_WIDTH) + self.raw.capacity() * 3 / 2
                <= self.decoded.capacity(),
            "lookahead of {length} characters cannot fit the decoded buffer",
        );

        // Once the stream has ended and every raw byte has been decoded,
        // nothing more can ever be produced.
        if self.eof && self.raw.is_empty() {
            return Ok(());
        }
        if self.unread >= length {
            return Ok(());
        }

        let encoding = match self.encoding {
            Some(encoding) => encoding,
            None => self.determine_encoding()?,
        };

        // Drop the consumed prefix so the whole capacity is writable.
        self.decoded.compact();

        while self.unread < length {
            self.fill_raw()?;
            self.drain_raw(encoding)?;

            if self.eof {
                // End of stream: everything decodable has been decoded.
                // Terminate the output once; the check at the top keeps
                // later calls from ever reaching this point again.
                self.decoded.push(0);
                self.unread += 1;
                return Ok(());
            }
        }
        Ok(())
    }

    /// Fixes the stream encoding from the first bytes. Called exactly once,
    /// at offset 0, before any character is decoded.
    fn determine_encoding(&mut self) -> Result<Encoding, ReaderError> {
        while !self.eof && self.raw.unread().len() < Encoding::DETECT_LEN {
            self.fill_raw()?;
        }

        let (encoding, mark_len) = Encoding::detect(self.raw.unread());
        self.raw.consume(mark_len);
        self.offset += mark_len as u64;
        self.encoding = Some(encoding);
        Ok(encoding)
    }

    /// Tops up the raw buffer with at most one pull from the source.
    fn fill_raw(&mut self) -> Result<(), ReaderError> {
        if self.raw.is_full() || self.eof {
            return Ok(());
        }

        // Keep undecoded bytes; a partial sequence must survive the refill.
        self.raw.compact();

        let pulled = self
            .source
            .pull(self.raw.unwritten_mut())
            .map_err(|source| ReaderError::input(source, self.offset))?;
        self.raw.filled(pulled);
        if pulled == 0 {
            self.eof = true;
        }
        Ok(())
    }

    /// Decodes raw bytes into the canonical buffer until the raw buffer
    /// runs dry or ends mid-sequence.
    fn drain_raw(&mut self, encoding: Encoding) -> Result<(), ReaderError> {
        while !self.raw.is_empty() {
            match decoder::decode(encoding, self.raw.unread(), self.eof) {
                Ok(Step::Scalar { value, width }) => {
                    decoder::encode_canonical(&mut self.decoded, value);
                    self.unread += 1;
                    self.raw.consume(width);
                    self.offset += width as u64;
                }
                Ok(Step::Incomplete) => break,
                Err(error) => {
                    return Err(ReaderError::decode(
                        error.kind,
                        self.offset + error.at as u64,
                    ));
                }
            }
        }
        Ok(())
    }

    /// The unread decoded bytes, in canonical UTF-8.
    ///
    /// The view is only valid until the next call to [`ensure`], which may
    /// relocate the buffer contents.
    ///
    /// [`ensure`]: StreamingReader::ensure
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        self.decoded.unread()
    }

    /// The next unread decoded byte, if any. `0` is the end-of-stream
    /// sentinel; it never occurs anywhere else in the output.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.decoded.unread().first().copied()
    }

    /// Consumes `chars` decoded characters.
    ///
    /// Advancing past the buffered characters is a caller error, checked by
    /// a debug assertion; release builds stop at the end of the buffer.
    pub fn advance(&mut self, chars: usize) {
        debug_assert!(
            chars <= self.unread,
            "advanced by {chars} with only {} unread characters",
            self.unread,
        );
        for _ in 0..chars.min(self.unread) {
            let width = self
                .decoded
                .unread()
                .first()
                .map_or(0, |&lead| decoder::canonical_width(lead));
            self.decoded.consume(width);
            self.unread -= 1;
        }
    }

    /// The number of decoded characters available to [`advance`].
    ///
    /// [`advance`]: StreamingReader::advance
    #[must_use]
    pub fn unread(&self) -> usize {
        self.unread
    }

    /// The detected stream encoding, or `None` before the first decode.
    #[must_use]
    pub fn encoding(&self) -> Option<Encoding> {
        self.encoding
    }

    /// Raw bytes consumed so far, counted from the start of the stream.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Whether the source has reported end of stream.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.eof
    }
}

impl<S> fmt::Debug for StreamingReader<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingReader")
            .field("encoding", &self.encoding)
            .field("offset", &self.offset)
            .field("eof", &self.eof)
            .field("unread", &self.unread)
            .field("buffered", &self.decoded.unread().as_bstr())
            .finish_non_exhaustive()
    }
}
