//! props CLI
//!
//! Entry point for the `props` command-line tool.

use std::process;

use props::cli::{self, usage, version_text};
use props::{logging, pipeline, RunError, NAME};

fn main() {
    let config = match cli::parse_args(std::env::args_os()) {
        Ok(c) => c,
        Err(e) => fail(&e),
    };

    logging::init(config.verbosity);

    if config.show_help {
        print!("{}", usage());
        process::exit(2);
    }
    if config.show_version {
        println!("{}", version_text());
        process::exit(0);
    }

    if let Err(e) = pipeline::run(&config) {
        fail(&e);
    }
}

fn fail(err: &RunError) -> ! {
    eprintln!("{}: {}", NAME, err);
    if err.shows_usage() {
        print!("{}", usage());
    }
    process::exit(err.exit_code());
}
