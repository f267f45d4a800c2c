//! Unit tests for the CLI commands and generation orchestration.

use super::commands::run_generate;
use super::{Cli, CliError, Command, ExecutionSummary, GenerateCommand, render_summary, run_cli};

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use mingle_core::{ConfigErrorCode, DatasetError};
use rstest::rstest;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn generate_args(dir: &TempDir) -> GenerateCommand {
    GenerateCommand {
        people: 4,
        places: 2,
        global_likes: 1,
        local_likes: 1,
        places_lived_mean: 1.5,
        places_lived_sd: 0.5,
        local_likes_variance: 1.0,
        target_ratio: 0.5,
        seed: Some(42),
        output_dir: dir.path().to_path_buf(),
    }
}

#[test]
fn parse_defaults_match_the_documented_configuration() {
    let cli = Cli::parse_from(["mingle", "generate"]);
    let Command::Generate(command) = cli.command;
    assert_eq!(command.people, 25);
    assert_eq!(command.places, 5);
    assert_eq!(command.global_likes, 5);
    assert_eq!(command.local_likes, 5);
    assert_eq!(command.places_lived_mean, 3.0);
    assert_eq!(command.places_lived_sd, 1.0);
    assert_eq!(command.local_likes_variance, 1.0);
    assert_eq!(command.target_ratio, 0.2);
    assert_eq!(command.seed, None);
    assert_eq!(command.output_dir, PathBuf::from("./data"));
}

#[test]
fn parse_accepts_every_long_option() {
    let cli = Cli::parse_from([
        "mingle",
        "generate",
        "--people",
        "10",
        "--places",
        "3",
        "--global-likes",
        "2",
        "--local-likes",
        "4",
        "--places-lived-mean",
        "2.0",
        "--places-lived-sd",
        "0.5",
        "--local-likes-variance",
        "0.25",
        "--target-ratio",
        "0.3",
        "--seed",
        "7",
        "--output-dir",
        "/tmp/mingle-out",
    ]);
    let Command::Generate(command) = cli.command;
    assert_eq!(command.people, 10);
    assert_eq!(command.places, 3);
    assert_eq!(command.global_likes, 2);
    assert_eq!(command.local_likes, 4);
    assert_eq!(command.seed, Some(7));
    assert_eq!(command.output_dir, PathBuf::from("/tmp/mingle-out"));
}

#[test]
fn malformed_numeric_arguments_fail_to_parse() {
    let result = Cli::try_parse_from(["mingle", "generate", "--people", "-3"]);
    assert!(result.is_err(), "negative counts must be rejected by clap");
    let result = Cli::try_parse_from(["mingle", "generate", "--target-ratio", "lots"]);
    assert!(result.is_err(), "non-numeric ratios must be rejected by clap");
}

#[test]
fn generate_writes_the_full_schema() -> TestResult {
    let dir = TempDir::new()?;
    let summary = run_generate(generate_args(&dir))?;
    assert_eq!(summary.seed, 42);
    assert_eq!(summary.people, 4);
    assert_eq!(summary.observed + summary.targets, 12);
    assert_eq!(summary.targets, 6);
    assert_eq!(summary.files, 7);
    for name in [
        "lived_obs.txt",
        "likes_obs.txt",
        "knows_obs.txt",
        "knows_targets.txt",
        "knows_truth.txt",
        "knows_data.txt",
        "options.json",
    ] {
        assert!(dir.path().join(name).is_file(), "missing {name}");
    }
    Ok(())
}

#[test]
fn generate_is_reproducible_across_invocations() -> TestResult {
    let dir_a = TempDir::new()?;
    let dir_b = TempDir::new()?;
    run_generate(generate_args(&dir_a))?;
    run_generate(generate_args(&dir_b))?;
    for name in ["lived_obs.txt", "likes_obs.txt", "knows_data.txt", "options.json"] {
        let a = fs::read(dir_a.path().join(name))?;
        let b = fs::read(dir_b.path().join(name))?;
        assert_eq!(a, b, "file {name} differs between identical runs");
    }
    Ok(())
}

#[test]
fn recorded_seed_replays_an_entropy_seeded_run() -> TestResult {
    let dir_a = TempDir::new()?;
    let mut args = generate_args(&dir_a);
    args.seed = None;
    let first = run_generate(args)?;

    let dir_b = TempDir::new()?;
    let mut replay_args = generate_args(&dir_b);
    replay_args.seed = Some(first.seed);
    run_generate(replay_args)?;

    let a = fs::read(dir_a.path().join("knows_data.txt"))?;
    let b = fs::read(dir_b.path().join("knows_data.txt"))?;
    assert_eq!(a, b, "replaying the recorded seed must reproduce the run");
    Ok(())
}

#[test]
fn options_file_records_the_resolved_seed() -> TestResult {
    let dir = TempDir::new()?;
    run_generate(generate_args(&dir))?;
    let raw = fs::read_to_string(dir.path().join("options.json"))?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(parsed["seed"], 42);
    assert_eq!(parsed["people"], 4);
    assert_eq!(parsed["target_ratio"], 0.5);
    Ok(())
}

#[rstest]
#[case::ratio_too_high(
    |args: &mut GenerateCommand| args.target_ratio = 1.5,
    ConfigErrorCode::TargetRatioOutOfRange
)]
#[case::no_places(
    |args: &mut GenerateCommand| args.places = 0,
    ConfigErrorCode::NoPlaces
)]
#[case::lonely_population(
    |args: &mut GenerateCommand| args.people = 1,
    ConfigErrorCode::PopulationTooSmall
)]
#[case::negative_sd(
    |args: &mut GenerateCommand| args.places_lived_sd = -1.0,
    ConfigErrorCode::NegativeStandardDeviation
)]
fn invalid_configurations_fail_before_writing(
    #[case] mutate: fn(&mut GenerateCommand),
    #[case] expected: ConfigErrorCode,
) {
    let dir = TempDir::new().expect("temp dir");
    let mut args = generate_args(&dir);
    mutate(&mut args);
    let err = run_generate(args).expect_err("invalid configuration must fail");
    let CliError::Dataset(dataset) = err;
    assert_eq!(dataset.config_code(), Some(expected));
    // Validation failures precede generation, so nothing is written.
    let entries: Vec<_> = fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|entry| entry.ok())
        .collect();
    assert!(entries.is_empty(), "no files expected, found {entries:?}");
}

#[test]
fn unwritable_output_is_an_io_error() -> TestResult {
    let dir = TempDir::new()?;
    let blocker = dir.path().join("occupied");
    fs::write(&blocker, b"not a directory")?;
    let mut args = generate_args(&dir);
    args.output_dir = blocker;
    let err = run_generate(args).expect_err("writing into a file path must fail");
    let CliError::Dataset(dataset) = err;
    assert!(matches!(dataset, DatasetError::Io { .. }));
    Ok(())
}

#[test]
fn run_cli_dispatches_generate() -> TestResult {
    let dir = TempDir::new()?;
    let cli = Cli {
        command: Command::Generate(generate_args(&dir)),
    };
    let summary = run_cli(cli)?;
    assert_eq!(summary.people, 4);
    Ok(())
}

#[test]
fn render_summary_reports_counts_and_destination() -> TestResult {
    let summary = ExecutionSummary {
        seed: 42,
        people: 4,
        observed: 6,
        targets: 6,
        output_dir: PathBuf::from("./data"),
        files: 7,
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert_eq!(
        text,
        "seed: 42\npeople: 4\nobserved pairs: 6\ntarget pairs: 6\nwrote 7 files to ./data\n"
    );
    Ok(())
}
