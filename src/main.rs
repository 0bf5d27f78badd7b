//! kbase - Local knowledge-base search
//!
//! kbase provides:
//! - Binary-search lookups (exact id and id range) over a fixed-width catalog
//! - Phrase search with single-character wildcards across text documents
//! - Unified output format (jsonl/json/md/text)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod core;
mod flows;
mod phrase;
mod records;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Diagnostics go to stderr; stdout carries results only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_directive().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!cli.no_color && std::io::IsTerminal::is_terminal(&std::io::stderr())),
        )
        .init();

    cli::run(cli)
}
