//! Serialization of a generated dataset to its on-disk schema.
//!
//! Fact files are tab-separated with one record per line; `options.json`
//! records every configuration parameter plus the resolved seed so a run can
//! be replayed. Each file is written to a sibling temporary path and renamed
//! into place, so an interrupted run never leaves a truncated file that could
//! be mistaken for complete output.

use std::{
    fmt::Write as _,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    config::GeneratorConfig,
    dataset::Dataset,
    error::{DatasetError, Result},
    partition::LabeledPair,
};

const LIVED_OBS: &str = "lived_obs.txt";
const LIKES_OBS: &str = "likes_obs.txt";
const KNOWS_OBS: &str = "knows_obs.txt";
const KNOWS_TARGETS: &str = "knows_targets.txt";
const KNOWS_TRUTH: &str = "knows_truth.txt";
const KNOWS_DATA: &str = "knows_data.txt";
const OPTIONS: &str = "options.json";

/// Writes datasets into a target directory.
#[derive(Debug, Clone)]
pub struct DatasetWriter {
    output_dir: PathBuf,
}

/// Paths written by a successful [`DatasetWriter::write`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    files: Vec<PathBuf>,
}

impl WriteReport {
    /// The files written, in write order.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

#[derive(Serialize)]
struct RunMetadata<'a> {
    #[serde(flatten)]
    config: &'a GeneratorConfig,
    seed: u64,
}

impl DatasetWriter {
    /// Creates a writer targeting `output_dir`. The directory is created on
    /// the first write if it does not exist.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The directory this writer targets.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Serializes `dataset` into the output directory.
    ///
    /// # Errors
    /// Returns [`DatasetError::Io`] when the directory cannot be created or a
    /// file cannot be written, and [`DatasetError::Metadata`] when the
    /// metadata record fails to serialize. There is no retry or partial-file
    /// recovery: regenerate on failure.
    #[instrument(
        name = "mingle.write_dataset",
        err,
        skip_all,
        fields(output_dir = %self.output_dir.display())
    )]
    pub fn write(&self, dataset: &Dataset) -> Result<WriteReport> {
        fs::create_dir_all(&self.output_dir).map_err(|source| DatasetError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let entries = [
            (LIVED_OBS, render_lived(dataset)),
            (LIKES_OBS, render_likes(dataset)),
            (KNOWS_OBS, render_labeled(dataset.partitions().observed())),
            (KNOWS_TARGETS, render_targets(dataset)),
            (KNOWS_TRUTH, render_labeled(dataset.partitions().truth())),
            (KNOWS_DATA, render_labeled(dataset.partitions().reference())),
            (OPTIONS, render_metadata(dataset)?),
        ];

        let mut files = Vec::with_capacity(entries.len());
        for (name, contents) in entries {
            let path = self.output_dir.join(name);
            write_atomic(&path, contents.as_bytes())?;
            files.push(path);
        }

        info!(files = files.len(), "dataset written");
        Ok(WriteReport { files })
    }
}

/// Writes `contents` to a sibling `.tmp` path, then renames into place.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let temp = temp_path(path);
    let map_err = |source: io::Error| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&temp, contents).map_err(map_err)?;
    fs::rename(&temp, path).map_err(|source| {
        // Leave nothing behind that resembles output.
        let _ = fs::remove_file(&temp);
        map_err(source)
    })?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map_or_else(
        || std::ffi::OsString::from("output"),
        std::ffi::OsStr::to_os_string,
    );
    name.push(".tmp");
    path.with_file_name(name)
}

fn render_lived(dataset: &Dataset) -> String {
    let mut out = String::new();
    for person in dataset.people() {
        for place in person.places_lived() {
            let _ = writeln!(out, "{}\t{place}", person.index());
        }
    }
    out
}

/// Global and local preferences share one thing namespace: local indices are
/// offset by the global-thing count.
fn render_likes(dataset: &Dataset) -> String {
    let offset = dataset.config().global_likes();
    let mut out = String::new();
    for person in dataset.people() {
        for (thing, value) in person.global_prefs().iter().enumerate() {
            let _ = writeln!(out, "{}\t{thing}\t{value}", person.index());
        }
    }
    for person in dataset.people() {
        for (thing, value) in person.local_prefs().iter().enumerate() {
            let _ = writeln!(out, "{}\t{}\t{value}", person.index(), offset + thing);
        }
    }
    out
}

fn render_labeled(pairs: &[LabeledPair]) -> String {
    let mut out = String::new();
    for pair in pairs {
        let _ = writeln!(out, "{}\t{}\t{}", pair.i, pair.j, u8::from(pair.knows));
    }
    out
}

fn render_targets(dataset: &Dataset) -> String {
    let mut out = String::new();
    for &(i, j) in dataset.partitions().targets() {
        let _ = writeln!(out, "{i}\t{j}");
    }
    out
}

fn render_metadata(dataset: &Dataset) -> Result<String> {
    let metadata = RunMetadata {
        config: dataset.config(),
        seed: dataset.seed(),
    };
    serde_json::to_string_pretty(&metadata)
        .map_err(|source| DatasetError::Metadata { source })
}
