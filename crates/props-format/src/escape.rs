//! Backslash escape decoding and encoding.
//!
//! Decoding understands `\\`, `\t`, `\n`, `\r`, `\f`, `\uXXXX` and drops the
//! backslash in front of any other character. Encoding produces pure ASCII:
//! anything outside printable ASCII becomes `\uXXXX` (UTF-16 code units,
//! uppercase hex).

use crate::error::FormatError;
use std::str::Chars;

/// Decode the escapes in a raw key or value.
///
/// `line` is only used to locate a malformed `\u` escape in the error.
/// Consecutive `\uXXXX` escapes that form a surrogate pair decode to one
/// character; an unpaired surrogate becomes U+FFFD.
pub fn unescape(raw: &str, line: usize) -> Result<String, FormatError> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_units(&mut units, &mut out, line);
            out.push(c);
            continue;
        }

        let decoded = match chars.next() {
            // Lone trailing backslash
            None => break,
            Some('u') => {
                units.push(read_code_unit(&mut chars, line)?);
                continue;
            }
            Some('t') => '\t',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('f') => '\x0c',
            Some(other) => other,
        };
        flush_units(&mut units, &mut out, line);
        out.push(decoded);
    }
    flush_units(&mut units, &mut out, line);

    Ok(out)
}

fn read_code_unit(chars: &mut Chars<'_>, line: usize) -> Result<u16, FormatError> {
    let mut value: u16 = 0;
    let mut seen = String::from("\\u");

    for _ in 0..4 {
        let digit = chars.next().and_then(|c| {
            seen.push(c);
            c.to_digit(16)
        });
        match digit {
            Some(d) => value = (value << 4) | d as u16,
            None => {
                return Err(FormatError::MalformedEscape {
                    line,
                    sequence: seen,
                })
            }
        }
    }

    Ok(value)
}

fn flush_units(units: &mut Vec<u16>, out: &mut String, line: usize) {
    if units.is_empty() {
        return;
    }
    for decoded in char::decode_utf16(units.drain(..)) {
        match decoded {
            Ok(c) => out.push(c),
            Err(e) => {
                tracing::warn!(
                    line,
                    unit = %format!("{:04X}", e.unpaired_surrogate()),
                    "unpaired surrogate in \\u escape, substituting U+FFFD"
                );
                out.push(char::REPLACEMENT_CHARACTER);
            }
        }
    }
}

/// Encode a key: whitespace and the separator/comment characters are escaped
/// so the key reads back unchanged.
pub fn escape_key(key: &str) -> String {
    escape(key, true)
}

/// Encode a value: only a leading space needs protecting from the parser's
/// whitespace skipping.
pub fn escape_value(value: &str) -> String {
    escape(value, false)
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len() + 8);

    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => push_unicode_escape(&mut out, c),
        }
    }

    out
}

fn push_unicode_escape(out: &mut String, c: char) {
    let mut buf = [0u16; 2];
    for unit in c.encode_utf16(&mut buf) {
        out.push_str(&format!("\\u{:04X}", unit));
    }
}

/// Encode header text for a `#` comment.
///
/// Embedded line breaks start a new comment line and characters above U+007E
/// are written as `\uXXXX`; everything else is left alone. The returned text
/// uses `line_ending` between lines and has no trailing terminator.
pub fn escape_comment(text: &str, line_ending: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(line_ending);
                if !matches!(chars.peek(), Some('#') | Some('!')) {
                    out.push_str("# ");
                }
            }
            c if c > '~' => push_unicode_escape(&mut out, c),
            c => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_control_sequences() {
        assert_eq!(unescape("a\\tb\\nc", 1).unwrap(), "a\tb\nc");
        assert_eq!(unescape("\\r\\f\\\\", 1).unwrap(), "\r\x0c\\");
    }

    #[test]
    fn test_unescape_drops_backslash_before_other_chars() {
        assert_eq!(unescape("k\\:ey\\=\\#\\ x\\q", 1).unwrap(), "k:ey=# xq");
    }

    #[test]
    fn test_unescape_unicode_either_case() {
        assert_eq!(unescape("\\u00e9\\u00E9", 1).unwrap(), "éé");
        assert_eq!(unescape("caf\\u00e9!", 1).unwrap(), "café!");
    }

    #[test]
    fn test_unescape_surrogate_pair() {
        assert_eq!(unescape("\\uD83D\\uDE00", 1).unwrap(), "😀");
    }

    #[test]
    fn test_unescape_unpaired_surrogate_is_replaced() {
        assert_eq!(unescape("\\uD83Dx", 1).unwrap(), "\u{fffd}x");
    }

    #[test]
    fn test_unescape_malformed_unicode() {
        let err = unescape("bad\\u12G4", 7).unwrap_err();
        match err {
            FormatError::MalformedEscape { line, sequence } => {
                assert_eq!(line, 7);
                assert_eq!(sequence, "\\u12G");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(unescape("short\\u12", 1).unwrap_err().is_malformed());
    }

    #[test]
    fn test_unescape_trailing_backslash() {
        assert_eq!(unescape("abc\\", 1).unwrap(), "abc");
    }

    #[test]
    fn test_escape_key_specials() {
        assert_eq!(escape_key("a b=c:d#e!f"), "a\\ b\\=c\\:d\\#e\\!f");
        assert_eq!(escape_key("#comment-like"), "\\#comment-like");
    }

    #[test]
    fn test_escape_value_leading_space_only() {
        assert_eq!(escape_value(" a b"), "\\ a b");
        assert_eq!(escape_value("a=b:c"), "a=b:c");
    }

    #[test]
    fn test_escape_controls_and_backslash() {
        assert_eq!(escape_value("C:\\dir\tx\n"), "C:\\\\dir\\tx\\n");
        assert_eq!(escape_value("\r\x0c"), "\\r\\f");
    }

    #[test]
    fn test_escape_non_ascii() {
        assert_eq!(escape_value("café"), "caf\\u00E9");
        assert_eq!(escape_value("😀"), "\\uD83D\\uDE00");
        assert_eq!(escape_value("\x07"), "\\u0007");
    }

    #[test]
    fn test_escape_comment_newlines() {
        assert_eq!(escape_comment("one\ntwo", "\n"), "one\n# two");
        assert_eq!(escape_comment("one\r\n#two", "\n"), "one\n#two");
        assert_eq!(escape_comment("naïve ☃", "\n"), "na\\u00EFve \\u2603");
        assert_eq!(escape_comment("tab\there\x7f", "\n"), "tab\there\\u007F");
    }
}
