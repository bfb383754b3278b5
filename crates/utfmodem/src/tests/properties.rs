use alloc::{
    string::String,
    vec,
    vec::Vec,
};

use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use super::{chunked, decode_all};
use crate::{StreamingReader, decoder};

/// Strips the characters the reader rejects, leaving an input it must
/// accept verbatim.
fn allowed_only(s: &str) -> String {
    s.chars()
        .filter(|&ch| decoder::is_allowed(u32::from(ch)))
        .collect()
}

/// Decoding valid UTF-8 and re-encoding it canonically reproduces the
/// original bytes exactly.
#[test]
fn utf8_decoding_is_the_identity() {
    fn prop(s: String) -> bool {
        let text = allowed_only(&s);
        // A leading U+FEFF would read as a byte order mark, not content.
        if text.starts_with('\u{FEFF}') {
            return true;
        }
        decode_all(text.as_bytes()).as_deref() == Ok(text.as_bytes())
    }
    QuickCheck::new().quickcheck(prop as fn(String) -> bool);
}

/// Decoding UTF-16 of either byte order produces the UTF-8 form of the
/// same scalar sequence.
#[test]
fn utf16_decodes_to_the_utf8_form() {
    fn prop(s: String, big_endian: bool) -> bool {
        let text = allowed_only(&s);
        let mut bytes: Vec<u8> = if big_endian {
            vec![0xFE, 0xFF]
        } else {
            vec![0xFF, 0xFE]
        };
        for unit in text.encode_utf16() {
            let pair = if big_endian {
                unit.to_be_bytes()
            } else {
                unit.to_le_bytes()
            };
            bytes.extend_from_slice(&pair);
        }
        decode_all(&bytes).as_deref() == Ok(text.as_bytes())
    }
    QuickCheck::new().quickcheck(prop as fn(String, bool) -> bool);
}

/// However the source chops the stream into pulls, the decoded output is
/// unchanged.
#[quickcheck]
fn chunking_never_changes_the_output(s: String, chunk: usize) -> bool {
    let text = allowed_only(&s);
    if text.starts_with('\u{FEFF}') {
        return true;
    }
    let chunk = 1 + chunk % 7;

    let mut reader = StreamingReader::new(chunked(text.as_bytes(), chunk));
    let mut out = Vec::new();
    loop {
        reader.ensure(1).unwrap();
        let buffered = reader.buffered();
        let Some(&lead) = buffered.first() else { break };
        if lead == 0 {
            break;
        }
        let width = decoder::canonical_width(lead);
        out.extend_from_slice(&buffered[..width]);
        reader.advance(1);
    }
    out == text.as_bytes()
}
