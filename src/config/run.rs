//! Settings for a single `props` invocation.

use std::fmt;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::pipeline::RunError;

/// Which rendering the run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Properties text with a generated header comment.
    #[default]
    Properties,
    /// Sorted `key => value` lines with raw values.
    Listing,
}

/// Where the base document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "stdin"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// First `-f`/`--file` argument.
    pub base_file: Option<PathBuf>,

    /// Further `-f` arguments; accepted but unused.
    pub extra_files: Vec<PathBuf>,

    /// A lone `-` was given.
    pub use_stdin: bool,

    /// Raw `key=value` overrides, in command-line order.
    pub overrides: Vec<String>,

    /// `-h`/`--help` was given, or no arguments at all.
    pub show_help: bool,

    /// `--version` was given.
    pub show_version: bool,

    /// Properties text or the `--list` listing.
    pub format: OutputFormat,

    /// Output file; stdout when unset.
    pub output: Option<PathBuf>,

    /// Emit the timestamp comment in properties output.
    pub timestamp: bool,

    /// Count of `-v` flags.
    pub verbosity: u8,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_file: None,
            extra_files: Vec::new(),
            use_stdin: false,
            overrides: Vec::new(),
            show_help: false,
            show_version: false,
            format: OutputFormat::Properties,
            output: None,
            timestamp: true,
            verbosity: 0,
        }
    }
}

impl RunConfig {
    /// Resolve the base document source.
    ///
    /// Standard input wins over `--file` when both are given.
    pub fn input_source(&self) -> Result<InputSource, RunError> {
        if self.use_stdin {
            return Ok(InputSource::Stdin);
        }
        match &self.base_file {
            Some(path) => Ok(InputSource::File(path.clone())),
            None => Err(RunError::Argument("No input detected".to_string())),
        }
    }
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        let use_stdin = cli.props.iter().any(|p| p == "-");
        let overrides = cli.props.into_iter().filter(|p| p != "-").collect();

        let mut files = cli.files.into_iter();
        let base_file = files.next();
        let extra_files = files.collect();

        Self {
            base_file,
            extra_files,
            use_stdin,
            overrides,
            show_help: cli.help,
            show_version: cli.version,
            format: if cli.list {
                OutputFormat::Listing
            } else {
                OutputFormat::Properties
            },
            output: cli.output,
            timestamp: !cli.no_timestamp,
            verbosity: cli.verbose,
        }
    }
}
