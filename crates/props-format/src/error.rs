//! Error types for loading properties documents.

use std::io;
use thiserror::Error;

/// Failure while reading a properties document.
///
/// Everything else about the format is permissive: unknown escapes, bare keys
/// and stray separators all load without error.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The underlying reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A `\u` escape not followed by exactly four hex digits.
    #[error("malformed \\uxxxx encoding on line {line}: {sequence}")]
    MalformedEscape {
        /// 1-based physical line where the logical line starts.
        line: usize,
        /// The offending escape text as it appeared in the input.
        sequence: String,
    },
}

impl FormatError {
    /// True for errors caused by the document content rather than I/O.
    pub fn is_malformed(&self) -> bool {
        matches!(self, FormatError::MalformedEscape { .. })
    }
}
