mod properties;

use alloc::vec::Vec;

use crate::{ReaderError, SourceError, StreamingReader};

/// Decodes `input` to completion, returning the canonical bytes without the
/// trailing end-of-stream sentinel.
pub(crate) fn decode_all(input: &[u8]) -> Result<Vec<u8>, ReaderError> {
    let mut reader = StreamingReader::new(input);
    // One character is at least one raw byte, so this always runs to EOF.
    reader.ensure(input.len() + 1)?;
    let mut out = reader.buffered().to_vec();
    assert_eq!(out.pop(), Some(0), "output must end with the sentinel");
    Ok(out)
}

/// A source that hands out `input` in pulls of at most `chunk` bytes.
pub(crate) fn chunked(
    input: &[u8],
    chunk: usize,
) -> impl FnMut(&mut [u8]) -> Result<usize, SourceError> + '_ {
    let mut pos = 0;
    move |dest: &mut [u8]| {
        let n = chunk.min(input.len() - pos).min(dest.len());
        dest[..n].copy_from_slice(&input[pos..pos + n]);
        pos += n;
        Ok(n)
    }
}
