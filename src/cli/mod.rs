//! Command-line interface for the Gaana source.
//!
//! This module provides CLI commands for searching the catalog, resolving
//! gaana.com URLs, and inspecting configuration, standing in for a host
//! application that would embed the source directly.

mod commands;

pub use commands::{Cli, Commands, run_command};
