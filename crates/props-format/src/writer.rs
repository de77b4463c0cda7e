//! Serializers: properties text and the flat `key => value` listing.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::escape::{escape_comment, escape_key, escape_value};
use crate::table::PropertyTable;

/// Platform line separator.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// Platform line separator.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Options for [`store`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Written as a second comment line when set.
    pub timestamp: Option<DateTime<Utc>>,
    /// Terminator for every emitted line.
    pub line_ending: &'static str,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            timestamp: None,
            line_ending: LINE_ENDING,
        }
    }
}

impl StoreOptions {
    /// Options stamped with the current time.
    pub fn now() -> Self {
        Self {
            timestamp: Some(Utc::now()),
            ..Self::default()
        }
    }
}

/// Write `table` as a properties document.
///
/// Emits `# <header>` (if given), `# <timestamp>` (if configured), then one
/// escaped `key=value` line per entry in key order. The writer is flushed
/// before returning.
pub fn store<W: Write>(
    table: &PropertyTable,
    header: Option<&str>,
    out: &mut W,
    options: &StoreOptions,
) -> io::Result<()> {
    let eol = options.line_ending;

    if let Some(header) = header {
        write!(out, "# {}{}", escape_comment(header, eol), eol)?;
    }
    if let Some(ts) = options.timestamp {
        write!(out, "# {}{}", ts.format("%a %b %d %H:%M:%S UTC %Y"), eol)?;
    }

    for (key, value) in table {
        write!(out, "{}={}{}", escape_key(key), escape_value(value), eol)?;
    }

    out.flush()
}

/// Write `table` as `key => value` lines in key order, values unescaped.
pub fn write_listing<W: Write>(table: &PropertyTable, out: &mut W, line_ending: &str) -> io::Result<()> {
    for (key, value) in table {
        write!(out, "{} => {}{}", key, value, line_ending)?;
    }
    out.flush()
}
