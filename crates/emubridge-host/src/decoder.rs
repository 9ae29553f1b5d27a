//! Incremental UTF-8 decoding for engine stdout.

/// Decodes a byte stream delivered in arbitrary chunks.
///
/// A multi-byte character split across two chunks is held back and
/// completed by the next call. Invalid sequences become U+FFFD.
#[derive(Debug, Default, Clone)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut buf = std::mem::take(&mut self.pending);
        buf.extend_from_slice(chunk);

        let mut out = String::with_capacity(buf.len());
        let mut rest = &buf[..];
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, tail) = rest.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &tail[len..];
                        }
                        None => {
                            // Incomplete sequence at the end: wait for more.
                            self.pending = tail.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flush at end of stream. Leftover partial bytes become U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }

    /// Bytes held back waiting for the rest of a character.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Decode a complete, standalone chunk with no carried state.
    pub fn decode_once(chunk: &[u8]) -> String {
        String::from_utf8_lossy(chunk).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        let mut dec = Utf8StreamDecoder::new();
        assert_eq!(dec.decode(b"hello"), "hello");
        assert_eq!(dec.pending(), 0);
    }

    #[test]
    fn split_character_reassembled_when_reused() {
        let text = "price: 5\u{20ac}";
        let bytes = text.as_bytes();
        // Split inside the 3-byte euro sign.
        let cut = bytes.len() - 2;

        let mut dec = Utf8StreamDecoder::new();
        let first = dec.decode(&bytes[..cut]);
        assert_eq!(first, "price: 5");
        assert_eq!(dec.pending(), 1);
        let second = dec.decode(&bytes[cut..]);
        assert_eq!(format!("{first}{second}"), text);
    }

    #[test]
    fn split_character_lost_with_fresh_decoder() {
        let text = "\u{1f600}!";
        let bytes = text.as_bytes();
        let joined = format!(
            "{}{}",
            Utf8StreamDecoder::decode_once(&bytes[..2]),
            Utf8StreamDecoder::decode_once(&bytes[2..])
        );
        assert_ne!(joined, text);
        assert!(joined.contains(char::REPLACEMENT_CHARACTER));
    }

    #[test]
    fn byte_at_a_time() {
        let text = "a\u{e9}\u{4e2d}\u{1f600}z";
        let mut dec = Utf8StreamDecoder::new();
        let out: String = text.as_bytes().iter().map(|b| dec.decode(&[*b])).collect();
        assert_eq!(out, text);
    }

    #[test]
    fn invalid_bytes_replaced() {
        let mut dec = Utf8StreamDecoder::new();
        assert_eq!(dec.decode(b"a\xffb"), "a\u{fffd}b");
        // Lone continuation byte.
        assert_eq!(dec.decode(b"\x80c"), "\u{fffd}c");
    }

    #[test]
    fn finish_flushes_partial_sequence() {
        let mut dec = Utf8StreamDecoder::new();
        assert_eq!(dec.decode(b"ok\xe2\x82"), "ok");
        assert_eq!(dec.finish(), "\u{fffd}");
        assert_eq!(dec.pending(), 0);
        assert_eq!(dec.finish(), "");
    }
}
