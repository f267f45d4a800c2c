//! Command-line orchestration for the mingle dataset generator.
//!
//! The CLI offers a single `generate` command that validates the requested
//! configuration, runs the deterministic generation pipeline, and serializes
//! the partitioned dataset to an output directory.

mod commands;

pub use commands::{Cli, CliError, Command, ExecutionSummary, GenerateCommand, render_summary, run_cli};

#[cfg(test)]
mod tests;
