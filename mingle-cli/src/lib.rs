//! Command-line interface for the mingle dataset generator.
//!
//! Exposes the CLI surface and logging bootstrap as a library so the binary
//! entry point stays thin and the commands remain testable.

pub mod cli;
pub mod logging;
