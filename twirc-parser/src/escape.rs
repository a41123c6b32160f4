/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! IRCv3 tag value escaping.
//!
//! Tag values cannot carry `;`, space, CR, LF or a bare backslash on the
//! wire. They are written as two-byte backslash sequences instead:
//!
//! | sequence | byte |
//! |----------|------|
//! | `\:`     | `;`  |
//! | `\s`     | ` `  |
//! | `\\`     | `\`  |
//! | `\r`     | CR   |
//! | `\n`     | LF   |
//!
//! A backslash before any other byte is dropped and the byte kept. A
//! trailing backslash is dropped.

use bytes::BufMut;
use memchr::memchr;
use std::borrow::Cow;

/// Backslash that introduces an escape sequence.
pub const ESCAPE: u8 = b'\\';

/// Decodes the escape sequences in a raw tag value.
///
/// Returns the input unchanged, without allocating, when it contains no
/// backslash.
///
/// # Example
/// ```
/// use twirc_parser::escape::unescape_value;
///
/// assert_eq!(&*unescape_value(br"bar\sbaz"), b"bar baz");
/// ```
#[must_use]
pub fn unescape_value(raw: &[u8]) -> Cow<'_, [u8]> {
    if memchr(ESCAPE, raw).is_none() {
        return Cow::Borrowed(raw);
    }

    let mut out = Vec::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = memchr(ESCAPE, rest) {
        out.extend_from_slice(&rest[..pos]);
        match rest.get(pos + 1) {
            Some(&next) => {
                out.push(unescape_byte(next));
                rest = &rest[pos + 2..];
            }
            None => rest = &[],
        }
    }
    out.extend_from_slice(rest);

    Cow::Owned(out)
}

/// Maps the byte following a backslash to the byte it stands for.
#[inline]
const fn unescape_byte(byte: u8) -> u8 {
    match byte {
        b':' => b';',
        b's' => b' ',
        b'r' => b'\r',
        b'n' => b'\n',
        other => other,
    }
}

/// Returns the escape sequence for `byte`, if it needs one.
#[inline]
const fn escape_byte(byte: u8) -> Option<&'static [u8; 2]> {
    match byte {
        b';' => Some(br"\:"),
        b' ' => Some(br"\s"),
        b'\\' => Some(br"\\"),
        b'\r' => Some(br"\r"),
        b'\n' => Some(br"\n"),
        _ => None,
    }
}

/// Returns true if the value contains a byte that must be escaped.
#[inline]
#[must_use]
pub fn needs_escape(value: &[u8]) -> bool {
    value.iter().any(|&b| escape_byte(b).is_some())
}

/// Appends the escaped form of `value` to `dst`.
///
/// # Arguments
/// * `value` - The decoded tag value
/// * `dst` - The buffer to write to
pub fn escape_value_into<B: BufMut>(value: &[u8], dst: &mut B) {
    let mut start = 0;
    for (i, &b) in value.iter().enumerate() {
        if let Some(seq) = escape_byte(b) {
            dst.put_slice(&value[start..i]);
            dst.put_slice(seq);
            start = i + 1;
        }
    }
    dst.put_slice(&value[start..]);
}

/// Escapes a decoded tag value for the wire.
///
/// Returns the input unchanged, without allocating, when nothing needs
/// escaping.
#[must_use]
pub fn escape_value(value: &[u8]) -> Cow<'_, [u8]> {
    if !needs_escape(value) {
        return Cow::Borrowed(value);
    }
    let mut out = Vec::with_capacity(value.len() + 8);
    escape_value_into(value, &mut out);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_no_escapes_borrows() {
        let value = unescape_value(b"subscriber/22");
        assert!(matches!(value, Cow::Borrowed(_)));
        assert_eq!(&*value, b"subscriber/22");
    }

    #[test]
    fn test_unescape_table() {
        assert_eq!(&*unescape_value(br"a\sb"), b"a b");
        assert_eq!(&*unescape_value(br"a\:b"), b"a;b");
        assert_eq!(&*unescape_value(br"a\\b"), b"a\\b");
        assert_eq!(&*unescape_value(br"a\rb"), b"a\rb");
        assert_eq!(&*unescape_value(br"a\nb"), b"a\nb");
    }

    #[test]
    fn test_unescape_trailing_backslash_dropped() {
        assert_eq!(&*unescape_value(b"abc\\"), b"abc");
        assert_eq!(&*unescape_value(b"\\"), b"");
    }

    #[test]
    fn test_unescape_unknown_sequence_keeps_byte() {
        assert_eq!(&*unescape_value(br"\b\x"), b"bx");
    }

    #[test]
    fn test_unescape_consecutive() {
        assert_eq!(&*unescape_value(br"\\\s\:"), b"\\ ;");
        assert_eq!(&*unescape_value(br"\\s"), b"\\s");
    }

    #[test]
    fn test_escape_plain_borrows() {
        assert!(matches!(escape_value(b"plain"), Cow::Borrowed(_)));
        assert!(!needs_escape(b"#FFFF00"));
    }

    #[test]
    fn test_escape_value() {
        assert_eq!(&*escape_value(b"a b;c\\d\r\n"), br"a\sb\:c\\d\r\n");
    }

    #[test]
    fn test_escape_reverses_unescape() {
        let raw = br"semi\:colon\sspace\sand\\backslash";
        let decoded = unescape_value(raw);
        assert_eq!(&*decoded, b"semi;colon space and\\backslash");
        assert_eq!(&*escape_value(&decoded), raw);
    }

    #[test]
    fn test_escape_into_bytes_mut() {
        let mut buf = bytes::BytesMut::new();
        escape_value_into(b"hi there", &mut buf);
        assert_eq!(&buf[..], br"hi\sthere");
    }
}
