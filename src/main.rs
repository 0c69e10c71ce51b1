//! Lockstep CLI - ordered, fail-fast multi-module build orchestrator
//!
//! Entry point for the lockstep command-line application.

use clap::Parser;

use lockstep::cli::output::{display_error, exit_code};
use lockstep::cli::{Cli, LONG_VERSION};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(cli.log_level().into()),
        )
        .init();

    tracing::debug!("lockstep {LONG_VERSION}");

    // Run the command and forward the failing step's status
    if let Err(e) = cli.run() {
        display_error(&e);
        std::process::exit(exit_code(&e));
    }
}
