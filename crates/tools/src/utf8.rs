//! Incremental UTF-8 decoding for streaming byte sources.
//!
//! The decoder emits Unicode scalar values as `u32` code points, preserves
//! multi-byte sequences split across chunk boundaries, and makes forward
//! progress on invalid byte sequences by emitting U+FFFD. A single U+FEFF at
//! the very start of the stream is treated as a byte order mark and dropped.

const REPLACEMENT: u32 = 0xFFFD;
const BOM: u32 = 0xFEFF;

/// Streaming UTF-8 to code-point decoder.
///
/// - `carry` stores an incomplete UTF-8 suffix from the previous chunk (at
///   most 3 bytes).
/// - Invalid UTF-8 sequences are replaced with U+FFFD and decoding continues.
#[derive(Debug)]
pub struct Utf8Decoder {
    carry: Vec<u8>,
    at_start: bool,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self {
            carry: Vec::new(),
            at_start: true,
        }
    }

    /// Decode a byte chunk, appending code points to `out`.
    pub fn push_chunk(&mut self, bytes: &[u8], out: &mut Vec<u32>) {
        if bytes.is_empty() {
            return;
        }

        if self.carry.is_empty() {
            self.decode_bytes(bytes, out);
            return;
        }

        // Resolve the carried suffix by copying just enough prefix bytes from
        // this chunk, then decode the rest directly without copying the chunk.
        let mut remaining = bytes;

        while !self.carry.is_empty() && !remaining.is_empty() {
            let expected_len = utf8_seq_len(self.carry[0]);
            if expected_len == 0 {
                self.emit(REPLACEMENT, out);
                self.carry.clear();
                break;
            }

            let needed = expected_len.saturating_sub(self.carry.len());
            if needed == 0 {
                let tmp = std::mem::take(&mut self.carry);
                self.decode_bytes(&tmp, out);
                continue;
            }

            if remaining.len() < needed {
                self.carry.extend_from_slice(remaining);
                return;
            }

            let mut scratch = [0u8; 8];
            let carry_len = self.carry.len();
            scratch[..carry_len].copy_from_slice(&self.carry);
            scratch[carry_len..carry_len + needed].copy_from_slice(&remaining[..needed]);
            self.carry.clear();

            let total = carry_len + needed;
            self.decode_bytes(&scratch[..total], out);

            remaining = &remaining[needed..];
        }

        if !remaining.is_empty() {
            self.decode_bytes(remaining, out);
        }
    }

    /// Flush any remaining carried bytes (as U+FFFD), so the stream is never
    /// silently truncated on completion.
    pub fn finish(&mut self, out: &mut Vec<u32>) {
        if self.carry.is_empty() {
            return;
        }
        self.emit(REPLACEMENT, out);
        self.carry.clear();
    }

    fn decode_bytes(&mut self, mut bytes: &[u8], out: &mut Vec<u32>) {
        while !bytes.is_empty() {
            match std::str::from_utf8(bytes) {
                Ok(s) => {
                    for ch in s.chars() {
                        self.emit(ch as u32, out);
                    }
                    break;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    if valid_up_to > 0 {
                        let valid = std::str::from_utf8(&bytes[..valid_up_to])
                            .expect("valid UTF-8 prefix");
                        for ch in valid.chars() {
                            self.emit(ch as u32, out);
                        }
                    }

                    match e.error_len() {
                        Some(len) => {
                            self.emit(REPLACEMENT, out);
                            bytes = &bytes[valid_up_to + len..];
                        }
                        None => {
                            self.carry.extend_from_slice(&bytes[valid_up_to..]);
                            break;
                        }
                    }
                }
            }
        }
    }

    fn emit(&mut self, cp: u32, out: &mut Vec<u32>) {
        if self.at_start {
            self.at_start = false;
            if cp == BOM {
                return;
            }
        }
        out.push(cp);
    }
}

impl Default for Utf8Decoder {
    fn default() -> Self {
        Self::new()
    }
}

fn utf8_seq_len(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(chunks: &[&[u8]]) -> Vec<u32> {
        let mut decoder = Utf8Decoder::new();
        let mut out = Vec::new();
        for chunk in chunks {
            decoder.push_chunk(chunk, &mut out);
        }
        decoder.finish(&mut out);
        out
    }

    fn cps(s: &str) -> Vec<u32> {
        s.chars().map(|c| c as u32).collect()
    }

    #[test]
    fn split_multibyte_across_chunks() {
        let mut decoder = Utf8Decoder::new();
        let mut out = Vec::new();

        decoder.push_chunk(&[0xC3], &mut out);
        assert!(out.is_empty());

        decoder.push_chunk(&[0x97], &mut out);
        assert_eq!(out, cps("×"));
    }

    #[test]
    fn resolves_carry_and_decodes_remaining_bytes() {
        let mut decoder = Utf8Decoder::new();
        let mut out = Vec::new();

        // First two bytes of 😀 (F0 9F 98 80).
        decoder.push_chunk(&[0xF0, 0x9F], &mut out);
        assert!(out.is_empty());

        // Remaining two bytes, plus ASCII payload afterwards.
        decoder.push_chunk(&[0x98, 0x80, b'!'], &mut out);
        assert_eq!(out, cps("😀!"));
    }

    #[test]
    fn carry_can_be_recreated_from_trailing_incomplete_sequence() {
        let mut decoder = Utf8Decoder::new();
        let mut out = Vec::new();

        // First byte of € (E2 82 AC).
        decoder.push_chunk(&[0xE2], &mut out);
        assert!(out.is_empty());

        // Complete €, then start another € that is left incomplete.
        decoder.push_chunk(&[0x82, 0xAC, 0xE2], &mut out);
        assert_eq!(out, cps("€"));

        decoder.finish(&mut out);
        assert_eq!(out, cps("€\u{FFFD}"));
    }

    #[test]
    fn invalid_bytes_make_progress() {
        assert_eq!(decode_all(&[&[0xFF, b'f']]), cps("\u{FFFD}f"));
    }

    #[test]
    fn leading_bom_is_skipped() {
        assert_eq!(decode_all(&[&[0xEF, 0xBB, 0xBF, b'a']]), cps("a"));
        // A BOM split across chunks is still recognized.
        assert_eq!(decode_all(&[&[0xEF, 0xBB], &[0xBF, b'a']]), cps("a"));
        // U+FEFF anywhere else is content.
        assert_eq!(decode_all(&[b"a", &[0xEF, 0xBB, 0xBF]]), cps("a\u{FEFF}"));
    }
}
