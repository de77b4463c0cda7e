//! Properties document parser.

use std::borrow::Cow;
use std::io::Read;

use crate::error::FormatError;
use crate::escape::unescape;
use crate::is_whitespace;
use crate::lines::LogicalLines;
use crate::table::PropertyTable;

/// Parse a properties document held in memory.
///
/// Later occurrences of a key replace earlier ones. On a malformed `\u`
/// escape nothing is returned.
pub fn parse_str(input: &str) -> Result<PropertyTable, FormatError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut table = PropertyTable::new();

    for line in LogicalLines::new(input) {
        let (raw_key, raw_value) = split_entry(&line.text);
        let key = unescape(raw_key, line.number)?;
        let value = unescape(raw_value, line.number)?;

        tracing::trace!(line = line.number, key = %key, "entry");
        table.insert(key, value);
    }

    Ok(table)
}

/// Read a whole properties document from `reader` and parse it.
///
/// The bytes are decoded with [`decode_bytes`].
pub fn parse_reader<R: Read>(mut reader: R) -> Result<PropertyTable, FormatError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_str(&decode_bytes(&bytes))
}

/// Decode raw document bytes.
///
/// Valid UTF-8 is used as is. Anything else is treated as ISO-8859-1, where
/// every byte is the code point of the same value.
pub fn decode_bytes(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(e) => {
            tracing::debug!(offset = e.valid_up_to(), "input is not UTF-8, decoding as ISO-8859-1");
            Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())
        }
    }
}

/// Split a logical line into its raw (still escaped) key and value.
///
/// The key ends at the first `=`, `:` or whitespace not escaped by a
/// backslash. After it, whitespace and at most one `=`/`:` are skipped.
fn split_entry(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut preceding_backslash = false;

    for (i, c) in line.char_indices() {
        if !preceding_backslash {
            if c == '=' || c == ':' {
                key_end = i;
                value_start = i + 1;
                has_separator = true;
                break;
            }
            if is_whitespace(c) {
                key_end = i;
                value_start = i + c.len_utf8();
                break;
            }
        }
        preceding_backslash = c == '\\' && !preceding_backslash;
    }

    let mut value = line[value_start..].trim_start_matches(is_whitespace);
    if !has_separator {
        if let Some(rest) = value.strip_prefix(|c: char| c == '=' || c == ':') {
            value = rest.trim_start_matches(is_whitespace);
        }
    }

    (&line[..key_end], value)
}
