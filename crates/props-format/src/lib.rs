//! Java `.properties` text format engine.
//!
//! Parses properties documents into a [`PropertyTable`] (honoring comments,
//! backslash escapes, `\uXXXX` escapes and line continuations) and writes a
//! table back out as properties text or as a flat `key => value` listing.

mod error;
mod escape;
mod lines;
mod merge;
mod parser;
mod table;
mod writer;

pub use error::FormatError;
pub use escape::{escape_comment, escape_key, escape_value, unescape};
pub use merge::merge;
pub use parser::{decode_bytes, parse_reader, parse_str};
pub use table::PropertyTable;
pub use writer::{store, write_listing, StoreOptions, LINE_ENDING};

/// Characters treated as whitespace by the format (space, tab, form feed).
pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}
