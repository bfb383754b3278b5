#![no_main]
use libfuzzer_sys::fuzz_target;
use utfmodem::{SourceError, StreamingReader};

fuzz_target!(|data: &[u8]| reader(data));

/// The first byte seeds a deterministic chunking; the rest is the stream.
/// Whatever the bytes, the reader must either decode to completion (ending
/// on the sentinel) or return an error; it must never panic or hang.
fn reader(data: &[u8]) {
    let Some((&seed, input)) = data.split_first() else {
        return;
    };
    let chunk = usize::from(seed) + 1;

    let mut pos = 0;
    let source = |dest: &mut [u8]| -> Result<usize, SourceError> {
        let n = chunk.min(input.len() - pos).min(dest.len());
        dest[..n].copy_from_slice(&input[pos..pos + n]);
        pos += n;
        Ok(n)
    };

    let mut reader = StreamingReader::new(source);
    loop {
        if reader.ensure(1).is_err() {
            return;
        }
        match reader.peek() {
            // The NUL sentinel never occurs mid-stream; it is end of input.
            Some(0) | None => return,
            Some(_) => reader.advance(1),
        }
    }
}
