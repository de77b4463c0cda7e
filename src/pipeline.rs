//! Run pipeline
//!
//! Sequences one invocation: resolve the input, load the base document,
//! apply the overrides, render to the selected output.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use props_format::{merge, parse_reader, store, write_listing, FormatError, PropertyTable, StoreOptions, LINE_ENDING};
use thiserror::Error;

use crate::config::{InputSource, OutputFormat, RunConfig};
use crate::{NAME, VERSION};

/// Failure of a run. Every variant is fatal.
#[derive(Debug, Error)]
pub enum RunError {
    /// Bad command line or no resolvable input.
    #[error("{0}")]
    Argument(String),

    /// Reading the input or writing the output failed.
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The document or an override could not be decoded.
    #[error("{origin}: {source}")]
    Format {
        origin: String,
        #[source]
        source: FormatError,
    },
}

impl RunError {
    /// Process exit status for this error.
    ///
    /// Malformed escapes share the usage-error status with bad arguments.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Argument(_) => 2,
            RunError::Io { .. } => 1,
            RunError::Format { source, .. } if source.is_malformed() => 2,
            RunError::Format { .. } => 1,
        }
    }

    /// Whether the usage text should follow the message.
    pub fn shows_usage(&self) -> bool {
        matches!(self, RunError::Argument(_))
    }

    fn from_format(origin: impl Into<String>, err: FormatError) -> Self {
        match err {
            FormatError::Io(source) => RunError::Io {
                path: origin.into(),
                source,
            },
            source => RunError::Format {
                origin: origin.into(),
                source,
            },
        }
    }

    fn io(path: &Path, source: io::Error) -> Self {
        RunError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Execute a run against the real stdin/stdout.
pub fn run(config: &RunConfig) -> Result<(), RunError> {
    let source = config.input_source()?;
    if !config.extra_files.is_empty() {
        tracing::debug!(ignored = config.extra_files.len(), "only the first --file is read");
    }

    let base = load_base(&source)?;
    tracing::debug!(source = %source, entries = base.len(), "loaded base document");

    let merged = apply_overrides(base, &config.overrides)?;
    let header = header_for(&source);

    match &config.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| RunError::io(path, e))?;
            let mut out = BufWriter::new(file);
            render(&merged, config, &header, &mut out).map_err(|e| RunError::io(path, e))?;
            tracing::info!(path = %path.display(), entries = merged.len(), "wrote output");
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            render(&merged, config, &header, &mut out).map_err(|e| RunError::Io {
                path: "stdout".to_string(),
                source: e,
            })?;
        }
    }

    Ok(())
}

/// Load the base document from `source`.
pub fn load_base(source: &InputSource) -> Result<PropertyTable, RunError> {
    let result = match source {
        InputSource::Stdin => parse_reader(io::stdin().lock()),
        InputSource::File(path) => {
            let file = File::open(path).map_err(|e| RunError::io(path, e))?;
            parse_reader(BufReader::new(file))
        }
    };
    result.map_err(|e| RunError::from_format(source.to_string(), e))
}

/// Merge the command-line overrides into `base`.
pub fn apply_overrides(base: PropertyTable, overrides: &[String]) -> Result<PropertyTable, RunError> {
    merge(base, overrides).map_err(|e| RunError::from_format("overrides", e))
}

/// Provenance comment for properties output.
pub fn header_for(source: &InputSource) -> String {
    format!("Generated by {} v{} from {}", NAME, VERSION, source)
}

/// Render `table` in the configured format. Flushes `out`.
pub fn render<W: Write>(table: &PropertyTable, config: &RunConfig, header: &str, out: &mut W) -> io::Result<()> {
    match config.format {
        OutputFormat::Listing => write_listing(table, out, LINE_ENDING),
        OutputFormat::Properties => {
            let options = if config.timestamp {
                StoreOptions::now()
            } else {
                StoreOptions::default()
            };
            store(table, Some(header), out, &options)
        }
    }
}
