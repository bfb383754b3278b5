//! Byte sources feeding the reader.

use alloc::string::String;
use thiserror::Error;

/// A fatal I/O failure reported by a [`PullSource`].
///
/// The reader treats any source error as non-retryable and reports it with
/// the current stream offset attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SourceError(String);

impl SourceError {
    /// Wraps a failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A pull-style byte source.
///
/// The reader issues at most one `pull` per refill step and never overlaps
/// calls. A `pull` may block the calling thread; cancellation, if needed,
/// must be built into the source itself.
pub trait PullSource {
    /// Fills `dest` with up to `dest.len()` bytes and returns how many were
    /// written. `Ok(0)` signals end of stream; after that the reader never
    /// calls `pull` again.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on an I/O failure. The reader treats it as
    /// fatal.
    fn pull(&mut self, dest: &mut [u8]) -> Result<usize, SourceError>;
}

/// In-memory input: yields the slice front to back, then end of stream.
impl PullSource for &[u8] {
    fn pull(&mut self, dest: &mut [u8]) -> Result<usize, SourceError> {
        let n = self.len().min(dest.len());
        let (head, tail) = self.split_at(n);
        dest[..n].copy_from_slice(head);
        *self = tail;
        Ok(n)
    }
}

/// Generic read handler: any closure with the pull signature is a source.
impl<F> PullSource for F
where
    F: FnMut(&mut [u8]) -> Result<usize, SourceError>,
{
    fn pull(&mut self, dest: &mut [u8]) -> Result<usize, SourceError> {
        self(dest)
    }
}
