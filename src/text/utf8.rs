//! Single-step UTF-8 decoding in the legacy extended form.
//!
//! Sequences of up to six bytes are accepted (lead bytes `0xF8`/`0xFC` included), so the decoded
//! scalar is a plain `u32` rather than a `char`. Overlong encodings are not rejected.

/// Outcome of decoding one code point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// A code point and the number of bytes it occupied (1..=6).
    Scalar { value: u32, len: usize },
    /// NUL lead byte or end of buffer.
    Eof,
    /// Malformed sequence at this position.
    Invalid,
}

/// Lead-byte masks, longest first: `(mask, payload bits, continuation bytes)`.
const LEAD_FORMS: [(u8, u8, usize); 5] = [
    (0xFC, 0x01, 5),
    (0xF8, 0x03, 4),
    (0xF0, 0x07, 3),
    (0xE0, 0x0F, 2),
    (0xC0, 0x1F, 1),
];

/// Decode the code point starting at `pos`.
///
/// Never reads past the first malformed continuation byte.
pub fn decode_next(buf: &[u8], pos: usize) -> Decoded {
    let Some(&lead) = buf.get(pos) else {
        return Decoded::Eof;
    };
    if lead == 0 {
        return Decoded::Eof;
    }
    if lead & 0x80 == 0 {
        return Decoded::Scalar {
            value: u32::from(lead),
            len: 1,
        };
    }

    let Some(&(_, payload, extra)) = LEAD_FORMS.iter().find(|(mask, _, _)| lead & mask == *mask)
    else {
        // 0x80..=0xBF: a continuation byte cannot start a sequence.
        return Decoded::Invalid;
    };

    let mut value = u32::from(lead & payload);
    for i in 1..=extra {
        match buf.get(pos + i) {
            Some(&b) if b & 0xC0 == 0x80 => value = (value << 6) | u32::from(b & 0x3F),
            _ => return Decoded::Invalid,
        }
    }

    Decoded::Scalar {
        value,
        len: extra + 1,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/utf8.rs"]
mod tests;
