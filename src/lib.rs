//! props - properties file merge tool
//!
//! Loads a Java `.properties` document, applies `key=value` overrides from
//! the command line and writes the merged result, either as properties text
//! or as a sorted `key => value` listing. The text format itself lives in the
//! `props-format` crate.

pub mod cli;
pub mod config;
pub mod logging;
pub mod pipeline;

pub use config::{InputSource, OutputFormat, RunConfig};
pub use pipeline::RunError;
pub use props_format::{merge, parse_reader, parse_str, store, write_listing, FormatError, PropertyTable, StoreOptions};

/// Program name used in messages and the generated header.
pub const NAME: &str = "props";

/// Version baked in at build time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
