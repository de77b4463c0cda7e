//! Run configuration
//!
//! The parsed command line as an explicit struct, plus the input/output
//! choices derived from it.

mod run;

pub use run::{InputSource, OutputFormat, RunConfig};
