//! Command-line surface.
//!
//! clap's built-in `--help`/`--version` handling is disabled: help must exit
//! with status 2, and both are reported back through [`RunConfig`] so the
//! binary decides what to print.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use clap::{ArgAction, Command, CommandFactory, Parser};

use crate::config::RunConfig;
use crate::pipeline::RunError;
use crate::{NAME, VERSION};

#[derive(Parser, Debug)]
#[command(name = "props")]
#[command(about = "Load a properties file, apply key=value overrides, and write the result")]
#[command(override_usage = "props [--file <in>|-] [\"key=value\" ...]")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Properties file to read (repeatable, only the first is used)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Print a sorted `key => value` listing instead of properties text
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Write output to FILE instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Omit the timestamp comment from properties output
    #[arg(long)]
    pub no_timestamp: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print this help
    #[arg(short = 'h', long)]
    pub help: bool,

    /// Print version and build information
    #[arg(long)]
    pub version: bool,

    /// Overrides in key=value form; a lone `-` reads the base document from stdin
    #[arg(value_name = "KEY=VALUE")]
    pub props: Vec<String>,
}

/// Parse a full argv (program name first) into a [`RunConfig`].
///
/// An argv with no arguments at all asks for help, matching `-h`.
pub fn parse_args<I, T>(args: I) -> Result<RunConfig, RunError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() <= 1 {
        return Ok(RunConfig {
            show_help: true,
            ..RunConfig::default()
        });
    }

    let cli = Cli::try_parse_from(split_positionals(args)).map_err(|e| RunError::Argument(clap_message(&e)))?;
    Ok(RunConfig::from(cli))
}

enum Token {
    Escape,
    Flag { expects_value: bool },
    Positional,
}

/// Move every positional token behind a `--`, keeping their order.
///
/// A single-dash token whose first letter is not one of our short flags is
/// an override (`-Dlevel=debug` is a legal key), not a flag bundle.
fn split_positionals(args: Vec<OsString>) -> Vec<OsString> {
    let mut cmd = Cli::command();
    cmd.build();

    let mut iter = args.into_iter();
    let mut flags: Vec<OsString> = iter.next().into_iter().collect();
    let mut positionals = Vec::new();

    while let Some(arg) = iter.next() {
        match classify(&cmd, &arg) {
            Token::Escape => {
                positionals.extend(iter.by_ref());
                break;
            }
            Token::Positional => positionals.push(arg),
            Token::Flag { expects_value } => {
                flags.push(arg);
                if expects_value {
                    flags.extend(iter.next());
                }
            }
        }
    }

    if !positionals.is_empty() {
        flags.push(OsString::from("--"));
        flags.append(&mut positionals);
    }
    flags
}

fn classify(cmd: &Command, arg: &OsStr) -> Token {
    let text = arg.to_string_lossy();
    if text == "--" {
        return Token::Escape;
    }

    // Unknown long flags go to clap so they are reported
    if let Some(long) = text.strip_prefix("--") {
        let takes_value = !long.contains('=')
            && cmd
                .get_arguments()
                .any(|a| a.get_long() == Some(long) && a.get_action().takes_values());
        return Token::Flag {
            expects_value: takes_value,
        };
    }

    let shorts = match text.strip_prefix('-') {
        Some(rest) if !rest.is_empty() => rest,
        _ => return Token::Positional,
    };

    let mut chars = shorts.chars();
    let mut first = true;
    while let Some(c) = chars.next() {
        match cmd.get_arguments().find(|a| a.get_short() == Some(c)) {
            Some(a) if a.get_action().takes_values() => {
                return Token::Flag {
                    expects_value: chars.as_str().is_empty(),
                }
            }
            Some(_) => first = false,
            None if first => return Token::Positional,
            None => break,
        }
    }
    Token::Flag { expects_value: false }
}

/// First line of a clap error, without clap's own `error: ` prefix.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}

/// Rendered help text.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Banner printed by `--version`.
pub fn version_text() -> String {
    format!(
        "{} {}\nLicense: {}\n\nbuilt for {}-{} ({})",
        NAME,
        VERSION,
        env!("CARGO_PKG_LICENSE"),
        std::env::consts::ARCH,
        std::env::consts::OS,
        std::env::consts::FAMILY,
    )
}
