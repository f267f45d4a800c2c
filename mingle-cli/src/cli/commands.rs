//! Command implementations and argument parsing for the mingle CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mingle_core::{DatasetError, DatasetWriter, GeneratorBuilder};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_PEOPLE: usize = 25;
const DEFAULT_PLACES: usize = 5;
const DEFAULT_GLOBAL_LIKES: usize = 5;
const DEFAULT_LOCAL_LIKES: usize = 5;
const DEFAULT_PLACES_LIVED_MEAN: f64 = 3.0;
const DEFAULT_PLACES_LIVED_SD: f64 = 1.0;
const DEFAULT_LOCAL_LIKES_VARIANCE: f64 = 1.0;
const DEFAULT_TARGET_RATIO: f64 = 0.2;
const DEFAULT_OUTPUT_DIR: &str = "./data";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "mingle", about = "Generate a synthetic acquaintances dataset.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a dataset and write it to the output directory.
    Generate(GenerateCommand),
}

/// Options accepted by the `generate` command.
///
/// clap enforces types; range and degeneracy checks live in the core builder
/// so every invalid configuration is rejected before a single random draw or
/// output file.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of people in the dataset.
    #[arg(long, default_value_t = DEFAULT_PEOPLE)]
    pub people: usize,

    /// Number of places in the dataset.
    #[arg(long, default_value_t = DEFAULT_PLACES)]
    pub places: usize,

    /// Number of global things to like.
    #[arg(long = "global-likes", default_value_t = DEFAULT_GLOBAL_LIKES)]
    pub global_likes: usize,

    /// Number of local things to like.
    #[arg(long = "local-likes", default_value_t = DEFAULT_LOCAL_LIKES)]
    pub local_likes: usize,

    /// Mean of the number of places a person has lived in.
    #[arg(long = "places-lived-mean", default_value_t = DEFAULT_PLACES_LIVED_MEAN)]
    pub places_lived_mean: f64,

    /// Standard deviation of the number of places a person has lived in.
    #[arg(long = "places-lived-sd", default_value_t = DEFAULT_PLACES_LIVED_SD)]
    pub places_lived_sd: f64,

    /// Noise for the likeability of a local thing based on places lived.
    #[arg(long = "local-likes-variance", default_value_t = DEFAULT_LOCAL_LIKES_VARIANCE)]
    pub local_likes_variance: f64,

    /// Fraction of pairs held out as inference targets.
    #[arg(long = "target-ratio", default_value_t = DEFAULT_TARGET_RATIO)]
    pub target_ratio: f64,

    /// Seed for the random number generator; drawn from OS entropy and
    /// recorded in the output metadata when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output directory for the generated files.
    #[arg(long = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Dataset generation or serialization failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Seed the run actually used, whether supplied or drawn.
    pub seed: u64,
    /// Population size of the generated dataset.
    pub people: usize,
    /// Number of fully observed `knows` pairs.
    pub observed: usize,
    /// Number of held-out target pairs.
    pub targets: usize,
    /// Directory the dataset files were written to.
    pub output_dir: PathBuf,
    /// Number of files written.
    pub files: usize,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when validation, generation, or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use mingle_cli::cli::{Cli, run_cli};
/// # use clap::Parser;
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let output_dir = dir.path().display().to_string();
/// let cli = Cli::parse_from([
///     "mingle",
///     "generate",
///     "--people", "4",
///     "--places", "2",
///     "--seed", "42",
///     "--target-ratio", "0.5",
///     "--output-dir", output_dir.as_str(),
/// ]);
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.seed, 42);
/// assert_eq!(summary.observed + summary.targets, 12);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Generate(generate) => {
            Span::current().record("command", field::display("generate"));
            run_generate(generate)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(people = command.people, output_dir = %command.output_dir.display()),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let mut builder = GeneratorBuilder::new()
        .with_people(command.people)
        .with_places(command.places)
        .with_global_likes(command.global_likes)
        .with_local_likes(command.local_likes)
        .with_places_lived_mean(command.places_lived_mean)
        .with_places_lived_sd(command.places_lived_sd)
        .with_local_likes_variance(command.local_likes_variance)
        .with_target_ratio(command.target_ratio);
    if let Some(seed) = command.seed {
        builder = builder.with_seed(seed);
    }
    let generator = builder.build().map_err(DatasetError::from)?;

    let dataset = generator.run();
    let report = DatasetWriter::new(&command.output_dir).write(&dataset)?;

    let summary = ExecutionSummary {
        seed: dataset.seed(),
        people: dataset.people().len(),
        observed: dataset.partitions().observed().len(),
        targets: dataset.partitions().targets().len(),
        output_dir: command.output_dir,
        files: report.files().len(),
    };
    info!(
        seed = summary.seed,
        people = summary.people,
        observed = summary.observed,
        targets = summary.targets,
        "generation completed"
    );
    Ok(summary)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use std::path::PathBuf;
/// # use mingle_cli::cli::{ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     seed: 42,
///     people: 4,
///     observed: 6,
///     targets: 6,
///     output_dir: PathBuf::from("./data"),
///     files: 7,
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer.into_inner())?;
/// assert!(text.starts_with("seed: 42\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "seed: {}", summary.seed)?;
    writeln!(writer, "people: {}", summary.people)?;
    writeln!(writer, "observed pairs: {}", summary.observed)?;
    writeln!(writer, "target pairs: {}", summary.targets)?;
    writeln!(
        writer,
        "wrote {} files to {}",
        summary.files,
        summary.output_dir.display()
    )?;
    Ok(())
}
