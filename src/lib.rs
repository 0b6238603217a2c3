//! Manuscript publishing built on an error-propagating outcome type.
//!
//! [`outcome`] holds the two result containers, [`pipeline`] chains typed
//! stages with them, and the remaining modules are the publishing domain
//! and its console front end.

#[macro_use]
pub mod logger;

pub mod cli;
pub mod config;
pub mod error;
pub mod manuscript;
pub mod outcome;
pub mod pipeline;
pub mod report;

pub use error::{FolioError, FolioResult};
pub use outcome::{MutableOutcome, Outcome};

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Entry point for the `folio` binary.
///
/// Returns whether the manuscript was published.
pub fn run() -> FolioResult<bool> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli::default_log_filter(&cli))),
        )
        .with_writer(std::io::stderr)
        .init();

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    cli::run_with(&cli, &mut input, &mut output)
}
