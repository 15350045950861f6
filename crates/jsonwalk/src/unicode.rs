//! Stateless single code point UTF-8 routines.
//!
//! [`decode_one`] reconstructs a code point from the front of a byte slice and
//! [`encode_one`] appends the encoding of a code point to a byte buffer. Both
//! work on plain `u32` values rather than `char` so that lone UTF-16
//! surrogates coming from `\uXXXX` escapes can be represented.
//!
//! `decode_one` only checks the lead byte and the available length; it does
//! not check the `10xxxxxx` marker of continuation bytes, nor overlong forms.
//! The lexer layers those checks on top (see [`is_continuation`] and
//! [`encoded_len`]).
use alloc::vec::Vec;

/// Largest value that has a UTF-8 encoding, plus one.
pub const CODE_POINT_LIMIT: u32 = 0x11_0000;

const LEAD_MASKS: [u8; 5] = [0x00, 0x7F, 0x1F, 0x0F, 0x07];
const LEAD_MARKS: [u8; 5] = [0x00, 0x00, 0xC0, 0xE0, 0xF0];

/// Length of the sequence announced by a lead byte, or `0` when the byte
/// cannot start a sequence (a continuation byte or a reserved pattern).
#[inline]
#[must_use]
pub const fn sequence_len(lead: u8) -> usize {
    if lead & 0x80 == 0x00 {
        1
    } else if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xF8 == 0xF0 {
        4
    } else {
        0
    }
}

/// `true` for bytes of the form `10xxxxxx`.
#[inline]
#[must_use]
pub const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Number of bytes [`encode_one`] writes for `cp`, or `0` if `cp` is out of
/// range.
#[inline]
#[must_use]
pub const fn encoded_len(cp: u32) -> usize {
    if cp < 0x80 {
        1
    } else if cp < 0x800 {
        2
    } else if cp < 0x1_0000 {
        3
    } else if cp < CODE_POINT_LIMIT {
        4
    } else {
        0
    }
}

/// Decodes the code point at the front of `bytes`.
///
/// Returns the code point and the number of bytes it occupies, or `None` when
/// `bytes` is empty, the lead byte is invalid, or the slice is shorter than the
/// announced sequence.
///
/// ```
/// use jsonwalk::unicode::decode_one;
///
/// assert_eq!(decode_one("♥!".as_bytes()), Some((0x2665, 3)));
/// assert_eq!(decode_one(&[0xE2, 0x99]), None);
/// ```
#[must_use]
pub fn decode_one(bytes: &[u8]) -> Option<(u32, usize)> {
    let &lead = bytes.first()?;
    let len = sequence_len(lead);
    if len == 0 || bytes.len() < len {
        return None;
    }

    let cp = bytes[1..len]
        .iter()
        .fold(u32::from(lead & LEAD_MASKS[len]), |acc, &b| {
            (acc << 6) | u32::from(b & 0x3F)
        });
    Some((cp, len))
}

/// Appends the UTF-8 encoding of `cp` to `out`.
///
/// Surrogate code points are encoded like any other three byte value; pairing
/// them up is the caller's business. Returns the number of bytes written, or
/// `None` (leaving `out` untouched) for values at or above U+110000.
#[must_use]
pub fn encode_one(cp: u32, out: &mut Vec<u8>) -> Option<usize> {
    let len = encoded_len(cp);
    if len == 0 {
        return None;
    }

    #[allow(clippy::cast_possible_truncation)]
    {
        let shift = 6 * (len - 1);
        out.push(((cp >> shift) as u8 & LEAD_MASKS[len]) | LEAD_MARKS[len]);
        for i in (0..len - 1).rev() {
            out.push(((cp >> (6 * i)) as u8 & 0x3F) | 0x80);
        }
    }
    Some(len)
}

/// Combines a UTF-16 surrogate pair into the supplementary code point it
/// denotes.
#[inline]
#[must_use]
pub const fn combine_surrogates(high: u16, low: u16) -> u32 {
    0x1_0000 + ((high as u32 - 0xD800) << 10) + (low as u32 - 0xDC00)
}

#[inline]
#[must_use]
pub const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

#[inline]
#[must_use]
pub const fn is_low_surrogate(unit: u16) -> bool {
    matches!(unit, 0xDC00..=0xDFFF)
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("\u{0000}", 0x0000)]
    #[case("\u{007F}", 0x007F)]
    #[case("\u{0080}", 0x0080)]
    #[case("\u{07FF}", 0x07FF)]
    #[case("\u{0800}", 0x0800)]
    #[case("\u{FFFF}", 0xFFFF)]
    #[case("\u{10000}", 0x1_0000)]
    #[case("\u{10FFFF}", 0x10_FFFF)]
    fn decode_valid(#[case] text: &str, #[case] expected: u32) {
        assert_eq!(decode_one(text.as_bytes()), Some((expected, text.len())));
    }

    #[rstest]
    #[case(0xC0)]
    #[case(0xE0)]
    #[case(0xF0)]
    fn decode_truncated(#[case] lead: u8) {
        assert_eq!(decode_one(&[lead]), None);
    }

    #[rstest]
    #[case(0x80)]
    #[case(0xBF)]
    #[case(0xF8)]
    #[case(0xFF)]
    fn decode_invalid_lead(#[case] lead: u8) {
        let bytes = [lead, 0x80, 0x80, 0x80, 0x80];
        assert_eq!(decode_one(&bytes), None);
    }

    #[test]
    fn decode_empty() {
        assert_eq!(decode_one(&[]), None);
    }

    #[test]
    fn encode_matches_std_for_every_length() {
        let text = "\u{0000}\u{007F}\u{0080}\u{07FF}\u{0800}\u{FFFF}\u{10000}\u{10FFFF}";
        let mut rest = text.as_bytes();
        let mut out = Vec::new();
        while !rest.is_empty() {
            let (cp, used) = decode_one(rest).unwrap();
            assert_eq!(encode_one(cp, &mut out), Some(used));
            rest = &rest[used..];
        }
        assert_eq!(String::from_utf8(out).unwrap(), text);
    }

    #[test]
    fn encode_out_of_range() {
        let mut out = Vec::new();
        assert_eq!(encode_one(CODE_POINT_LIMIT, &mut out), None);
        assert_eq!(encode_one(u32::MAX, &mut out), None);
        assert!(out.is_empty());
    }

    #[test]
    fn encode_lone_surrogate_as_three_bytes() {
        let mut out = Vec::new();
        assert_eq!(encode_one(0xD83D, &mut out), Some(3));
        assert_eq!(out, [0xED, 0xA0, 0xBD]);
    }

    #[test]
    fn surrogate_pair_combines() {
        assert!(is_high_surrogate(0xD83D));
        assert!(is_low_surrogate(0xDE00));
        assert_eq!(combine_surrogates(0xD83D, 0xDE00), 0x1_F600);
    }
}
