//! Override merging.
//!
//! Overrides are `key=value` strings in properties syntax. They are joined
//! into one document and parsed with the regular parser, so they follow
//! exactly the same escaping rules as a file.

use crate::error::FormatError;
use crate::parser::parse_str;
use crate::table::PropertyTable;

/// Apply `overrides` on top of `base`, later overrides winning.
///
/// The joined overrides are parsed as a single document, so an override
/// ending in a backslash continues into the next one.
pub fn merge<S: AsRef<str>>(mut base: PropertyTable, overrides: &[S]) -> Result<PropertyTable, FormatError> {
    if overrides.is_empty() {
        return Ok(base);
    }

    let document = overrides.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join("\n");
    let overlay = parse_str(&document)?;

    tracing::debug!(
        overrides = overrides.len(),
        entries = overlay.len(),
        "applying overrides"
    );
    base.overlay(overlay);

    Ok(base)
}
