//! Escape decoding for the body of one quoted string literal.
//!
//! Widths: octal takes up to 3 digits and names one byte (at most `\377`), `\x`
//! up to 8 hex digits (configurable), `\u` up to 4 and `\U` up to 8. Raw bytes map
//! to the code point of the same value; escape values are code points and must be
//! Unicode scalar values.

use crate::error::ErrorKind;

pub const OCTAL_MAX_DIGITS: usize = 3;
/// Octal escapes name a single byte.
pub const OCTAL_MAX_VALUE: u32 = 0xFF;
pub const HEX_MAX_DIGITS: usize = 8;
pub const UNICODE_SHORT_MAX_DIGITS: usize = 4;
pub const UNICODE_LONG_MAX_DIGITS: usize = 8;

/// A decode failure. `offset` is relative to the start of the literal body and
/// `partial` holds what was decoded before the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub kind: ErrorKind,
    pub offset: usize,
    pub partial: String,
}

/// Single-character escapes. Consulted before octal, so `\0` is always NUL on
/// its own.
pub fn named_escape(b: u8) -> Option<char> {
    Some(match b {
        b'n' => '\n',
        b't' => '\t',
        b'r' => '\r',
        b'\\' => '\\',
        b'\'' => '\'',
        b'"' => '"',
        b'?' => '?',
        b'a' => '\u{07}',
        b'b' => '\u{08}',
        b'e' => '\u{1B}',
        b'f' => '\u{0C}',
        b'v' => '\u{0B}',
        b'0' => '\0',
        _ => return None,
    })
}

/// Decodes a literal body that starts right after the opening `"`. Stops at the
/// first unescaped `"` and returns the value with the number of bytes consumed,
/// closing quote included. `hex_max` bounds the digits read after `\x` (1 to 8).
pub fn decode_quoted(body: &[u8], hex_max: usize) -> Result<(String, usize), DecodeError> {
    decode(body, true, hex_max)
}

/// Decodes a complete literal body with no surrounding quotes.
pub fn unescape(body: &[u8]) -> Result<String, DecodeError> {
    unescape_with(body, HEX_MAX_DIGITS)
}

pub fn unescape_with(body: &[u8], hex_max: usize) -> Result<String, DecodeError> {
    decode(body, false, hex_max).map(|(s, _)| s)
}

fn decode(body: &[u8], quoted: bool, hex_max: usize) -> Result<(String, usize), DecodeError> {
    let hex_max = hex_max.clamp(1, HEX_MAX_DIGITS);
    let mut out = String::with_capacity(body.len());
    let mut i = 0usize;
    while i < body.len() {
        let b = body[i];
        match b {
            b'"' if quoted => return Ok((out, i + 1)),
            b'\\' => {
                let Some(&e) = body.get(i + 1) else {
                    return Err(fail(ErrorKind::UnterminatedString, body.len(), out));
                };
                if let Some(c) = named_escape(e) {
                    out.push(c);
                    i += 2;
                    continue;
                }
                let (value, used) = match e {
                    b'0'..=b'7' => {
                        let (value, digits) = read_digits(&body[i + 1..], OCTAL_MAX_DIGITS, 8);
                        if value > OCTAL_MAX_VALUE {
                            return Err(fail(ErrorKind::EscapeOutOfRange { value }, i, out));
                        }
                        (value, digits)
                    }
                    b'x' | b'u' | b'U' => {
                        let max = match e {
                            b'x' => hex_max,
                            b'u' => UNICODE_SHORT_MAX_DIGITS,
                            _ => UNICODE_LONG_MAX_DIGITS,
                        };
                        let (value, digits) = read_digits(&body[i + 2..], max, 16);
                        if digits == 0 {
                            let kind = ErrorKind::MissingHexDigits { escape: e as char };
                            return Err(fail(kind, i, out));
                        }
                        (value, digits + 1)
                    }
                    _ => {
                        let kind = ErrorKind::UnsupportedEscape { escape: e as char };
                        return Err(fail(kind, i, out));
                    }
                };
                match char::from_u32(value) {
                    Some(c) => out.push(c),
                    None => return Err(fail(ErrorKind::EscapeOutOfRange { value }, i, out)),
                }
                i += 1 + used;
            }
            b'"' => return Err(fail(ErrorKind::UnescapedCharacter { byte: b }, i, out)),
            _ if b.is_ascii_control() => {
                return Err(fail(ErrorKind::UnescapedCharacter { byte: b }, i, out));
            }
            _ => {
                out.push(char::from(b));
                i += 1;
            }
        }
    }
    if quoted {
        return Err(fail(ErrorKind::UnterminatedString, body.len(), out));
    }
    Ok((out, i))
}

fn fail(kind: ErrorKind, offset: usize, partial: String) -> DecodeError {
    DecodeError {
        kind,
        offset,
        partial,
    }
}

/// Reads up to `max` digits of `radix`; returns the value and digit count.
fn read_digits(bytes: &[u8], max: usize, radix: u32) -> (u32, usize) {
    let mut value = 0u32;
    let mut count = 0usize;
    for &b in bytes.iter().take(max) {
        let Some(d) = char::from(b).to_digit(radix) else {
            break;
        };
        value = value * radix + d;
        count += 1;
    }
    (value, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(s: &[u8]) -> String {
        unescape(s).unwrap()
    }

    fn err(s: &[u8]) -> ErrorKind {
        unescape(s).unwrap_err().kind
    }

    #[test]
    fn named_escapes() {
        assert_eq!(ok(br"a\nb"), "a\nb");
        assert_eq!(ok(br#"\t\r\\\'\"\?"#), "\t\r\\'\"?");
        assert_eq!(ok(br"\a\b\e\f\v"), "\u{07}\u{08}\u{1B}\u{0C}\u{0B}");
    }

    #[test]
    fn nul_escape_never_takes_octal_digits() {
        assert_eq!(ok(br"\012"), "\u{0}12");
    }

    #[test]
    fn octal_escapes() {
        assert_eq!(ok(br"\101"), "A");
        assert_eq!(ok(br"\1018"), "A8");
        assert_eq!(ok(br"\7x"), "\u{07}x");
        assert_eq!(ok(br"\377"), "\u{FF}");
    }

    #[test]
    fn octal_escape_above_one_byte_is_rejected() {
        assert_eq!(err(br"\400"), ErrorKind::EscapeOutOfRange { value: 0o400 });
        let e = unescape(br"ab\777").unwrap_err();
        assert_eq!(e.kind, ErrorKind::EscapeOutOfRange { value: 0o777 });
        assert_eq!(e.offset, 2);
        assert_eq!(e.partial, "ab");
    }

    #[test]
    fn hex_escapes() {
        assert_eq!(ok(br"c\x41d"), "c\u{41d}");
        assert_eq!(unescape_with(br"c\x41d", 2).unwrap(), "cAd");
        assert_eq!(ok(br"\x41-"), "A-");
        assert_eq!(ok(br"\x000000416"), "A6");
    }

    #[test]
    fn unicode_escapes() {
        assert_eq!(ok(br"\u00e9"), "\u{e9}");
        assert_eq!(ok(br"\u00e9f"), "\u{e9}f");
        assert_eq!(ok(br"\U0001F600"), "\u{1F600}");
        assert_eq!(ok(br"\u41"), "A");
    }

    #[test]
    fn escape_errors() {
        assert_eq!(err(br"bad\q"), ErrorKind::UnsupportedEscape { escape: 'q' });
        assert_eq!(err(br"\xg"), ErrorKind::MissingHexDigits { escape: 'x' });
        assert_eq!(err(br"\U"), ErrorKind::MissingHexDigits { escape: 'U' });
        assert_eq!(err(br"\uD800"), ErrorKind::EscapeOutOfRange { value: 0xD800 });
        assert_eq!(
            err(br"\xFFFFFFFF"),
            ErrorKind::EscapeOutOfRange { value: 0xFFFF_FFFF }
        );
        assert_eq!(err(b"a\\"), ErrorKind::UnterminatedString);
    }

    #[test]
    fn raw_control_and_quote_must_be_escaped() {
        assert_eq!(err(b"a\tb"), ErrorKind::UnescapedCharacter { byte: b'\t' });
        assert_eq!(err(b"a\"b"), ErrorKind::UnescapedCharacter { byte: b'"' });
        assert_eq!(err(b"\x7f"), ErrorKind::UnescapedCharacter { byte: 0x7f });
    }

    #[test]
    fn error_keeps_partial_value() {
        let e = unescape(br"ab\qcd").unwrap_err();
        assert_eq!(e.partial, "ab");
        assert_eq!(e.offset, 2);
    }

    #[test]
    fn raw_high_bytes_are_latin1() {
        assert_eq!(ok(b"caf\xe9"), "caf\u{e9}");
    }

    #[test]
    fn quoted_stops_at_closing_quote() {
        let (s, used) = decode_quoted(br#"a\"b", "c""#, HEX_MAX_DIGITS).unwrap();
        assert_eq!(s, "a\"b");
        assert_eq!(used, 5);
    }

    #[test]
    fn quoted_without_close_is_unterminated() {
        let e = decode_quoted(b"abc", HEX_MAX_DIGITS).unwrap_err();
        assert_eq!(e.kind, ErrorKind::UnterminatedString);
        assert_eq!(e.partial, "abc");
    }
}
