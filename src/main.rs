//! codeindex CLI entry point

use clap::Parser;
use codeindex::cli::{generate, Cli};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Logs go to stderr; stdout carries progress
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("CODEINDEX_LOG"))
        .init();

    let cli = Cli::parse();

    if let Err(e) = generate::run(cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = generate::fatal_hint(&e) {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}
