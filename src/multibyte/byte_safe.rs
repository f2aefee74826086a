use super::TextBackend;

/// Backend that decodes UTF-8 straight from the byte stream.
///
/// The width of each sequence comes from its lead byte, so a slice never ends
/// inside a code point. Stray bytes, which a `&str` cannot contain but a
/// corrupted buffer could, decode to U+FFFD one byte at a time.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteSafeText;

impl ByteSafeText {
    fn sequence_width(lead: u8) -> usize {
        match lead {
            0x00..=0x7F => 1,
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => 1,
        }
    }

    fn decode_at(bytes: &[u8], at: usize) -> (char, usize) {
        let lead = bytes[at];
        let width = Self::sequence_width(lead);
        if width == 1 {
            let c = if lead < 0x80 { lead as char } else { char::REPLACEMENT_CHARACTER };
            return (c, 1);
        }
        if at + width > bytes.len() {
            return (char::REPLACEMENT_CHARACTER, 1);
        }

        let mut value = u32::from(lead) & (0x7F >> width);
        for &b in &bytes[at + 1..at + width] {
            if b & 0xC0 != 0x80 {
                return (char::REPLACEMENT_CHARACTER, 1);
            }
            value = (value << 6) | u32::from(b & 0x3F);
        }
        match char::from_u32(value) {
            Some(c) => (c, width),
            None => (char::REPLACEMENT_CHARACTER, 1),
        }
    }

    /// Decodes every scalar value in `bytes`.
    pub fn decode(bytes: &[u8]) -> Vec<char> {
        let mut out = Vec::with_capacity(bytes.len());
        let mut at = 0;
        while at < bytes.len() {
            let (c, width) = Self::decode_at(bytes, at);
            out.push(c);
            at += width;
        }
        out
    }
}

impl TextBackend for ByteSafeText {
    fn name(&self) -> &'static str {
        "byte-safe"
    }

    fn code_points(&self, s: &str) -> Vec<char> {
        Self::decode(s.as_bytes())
    }

    fn char_len(&self, s: &str) -> usize {
        // Continuation bytes never start a character.
        s.as_bytes().iter().filter(|&&b| b & 0xC0 != 0x80).count()
    }

    fn lower(&self, c: char, out: &mut String) {
        if c.is_ascii() {
            out.push(c.to_ascii_lowercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }

    fn upper(&self, c: char, out: &mut String) {
        if c.is_ascii() {
            out.push(c.to_ascii_uppercase());
        } else {
            out.extend(c.to_uppercase());
        }
    }
}
