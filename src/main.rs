//! Gaana Source - album and track metadata for music taggers.
//!
//! Talks to a self-hosted gaana-api gateway, maps its catalog records into
//! clean domain types, and scores candidates against local library items.
//! The CLI drives the same service code a tagging host would embed.

pub mod artwork;
pub mod cli;
pub mod config;
pub mod gaana;
pub mod matching;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("gaana_source=info".parse().unwrap()))
        .init();

    cli::run_command(&args)
}
