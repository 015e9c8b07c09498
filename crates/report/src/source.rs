// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Run discovery.
//!
//! [`DirectoryRunSource`] walks a results directory and builds one
//! [`RunRecord`] per run directory. A run directory holds a metadata file
//! (any file whose name ends in `metadata.json`) and, when the benchmark
//! completed, a `summary.json`:
//!
//! ```text
//! results/
//!   training/unet3d/run/20250111_160000/
//!     training_20250111_160000_metadata.json
//!     summary.json
//! ```
//!
//! Problems with one run never stop discovery of the others:
//!
//! - no metadata: logged, the run is skipped
//! - several metadata files: logged, the run is skipped
//! - unreadable metadata: logged, the run is skipped
//! - no summary, or an unreadable one: the run is kept with status `failed`
//!
//! Summaries may carry bare `NaN`, `Infinity` and `-Infinity` tokens for
//! metrics that could not be computed. They are read as the matching
//! non-finite floats.

use crate::context::ReportContext;
use crate::error::{ReportError, Result};
use chrono::NaiveDateTime;
use mlps_report_core::{BenchmarkType, Metrics, RunRecord, RunStatus};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Suffix identifying run metadata files.
pub const METADATA_SUFFIX: &str = "metadata.json";

/// Name of the benchmark summary file.
pub const SUMMARY_FILE: &str = "summary.json";

/// Format of `run_datetime` in metadata.
pub const DATETIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Supplies the run records of a results directory.
pub trait RunSource {
    /// Discover all runs below `ctx.results_dir()`.
    ///
    /// Per-run problems are handled inside the source; only failures that
    /// make discovery as a whole impossible are returned.
    fn discover(&self, ctx: &ReportContext) -> Result<Vec<RunRecord>>;
}

impl<S: RunSource + ?Sized> RunSource for &S {
    fn discover(&self, ctx: &ReportContext) -> Result<Vec<RunRecord>> {
        (**self).discover(ctx)
    }
}

/// Run metadata as written by the benchmark launcher.
#[derive(Debug, Deserialize)]
struct RunMetadata {
    benchmark_type: BenchmarkType,
    model: String,
    command: String,
    run_datetime: String,
    #[serde(default)]
    num_processes: Option<u32>,
    #[serde(default)]
    accelerator: Option<String>,
    #[serde(default)]
    parameters: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    override_parameters: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    system_info: serde_json::Map<String, serde_json::Value>,
}

/// The part of a benchmark summary the report consumes.
#[derive(Debug, Deserialize)]
struct RunSummary {
    #[serde(default)]
    metric: Metrics,
}

#[derive(Debug, Default)]
struct RunFiles {
    metadata: Vec<PathBuf>,
    summary: Option<PathBuf>,
}

/// Discovers runs by walking the results directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryRunSource;

impl DirectoryRunSource {
    /// Create the source.
    pub fn new() -> Self {
        Self
    }

    fn collect_run_files(results_dir: &Path) -> BTreeMap<PathBuf, RunFiles> {
        let mut runs: BTreeMap<PathBuf, RunFiles> = BTreeMap::new();
        for entry in WalkDir::new(results_dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable path during discovery: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(dir) = entry.path().parent() else {
                continue;
            };
            if name == SUMMARY_FILE {
                runs.entry(dir.to_path_buf()).or_default().summary = Some(entry.path().to_path_buf());
            } else if name.ends_with(METADATA_SUFFIX) {
                runs.entry(dir.to_path_buf())
                    .or_default()
                    .metadata
                    .push(entry.path().to_path_buf());
            }
        }
        runs
    }

    fn load_run(dir: &Path, files: RunFiles) -> Option<RunRecord> {
        let metadata_path = match files.metadata.as_slice() {
            [] => {
                error!(dir = %dir.display(), "No metadata file found for run, skipping");
                return None;
            }
            [single] => single,
            many => {
                error!(
                    dir = %dir.display(),
                    count = many.len(),
                    "Multiple metadata files found for run, skipping"
                );
                return None;
            }
        };

        let metadata: RunMetadata = match read_json(metadata_path) {
            Ok(metadata) => metadata,
            Err(err) => {
                error!(path = %metadata_path.display(), "Unable to read run metadata, skipping: {err}");
                return None;
            }
        };

        let (status, metrics) = match &files.summary {
            Some(summary_path) => match read_summary(summary_path) {
                Ok(summary) => (RunStatus::Completed, summary.metric),
                Err(err) => {
                    warn!(path = %summary_path.display(), "Unable to read run summary, marking run as failed: {err}");
                    (RunStatus::Failed, Metrics::new())
                }
            },
            None => {
                warn!(dir = %dir.display(), "No summary.json found for run, marking run as failed");
                (RunStatus::Failed, Metrics::new())
            }
        };

        let mut builder = RunRecord::builder()
            .benchmark_type(metadata.benchmark_type)
            .model(metadata.model)
            .command(metadata.command)
            .run_datetime(metadata.run_datetime)
            .maybe_accelerator(metadata.accelerator)
            .status(status)
            .parameters(metadata.parameters)
            .override_parameters(metadata.override_parameters)
            .system_info(metadata.system_info)
            .metrics(metrics);
        if let Some(n) = metadata.num_processes {
            builder = builder.num_processes(n);
        }

        match builder.build() {
            Ok(run) => {
                debug!(run_id = %run.run_id, status = ?run.status, "Loaded run");
                Some(run)
            }
            Err(err) => {
                error!(path = %metadata_path.display(), "Invalid run metadata, skipping: {err}");
                None
            }
        }
    }
}

impl RunSource for DirectoryRunSource {
    fn discover(&self, ctx: &ReportContext) -> Result<Vec<RunRecord>> {
        let run_dirs = Self::collect_run_files(ctx.results_dir());
        let candidates = run_dirs.len();

        let mut runs: Vec<RunRecord> = run_dirs
            .into_iter()
            .filter_map(|(dir, files)| Self::load_run(&dir, files))
            .collect();
        runs.sort_by_cached_key(|run| {
            let when = NaiveDateTime::parse_from_str(&run.run_datetime, DATETIME_FORMAT).ok();
            (when.is_none(), when, run.run_id.clone())
        });

        info!(
            "Discovered {} runs in {} ({} skipped)",
            runs.len(),
            ctx.results_dir().display(),
            candidates - runs.len()
        );
        Ok(runs)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

fn read_summary(path: &Path) -> Result<RunSummary> {
    let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    Ok(json5::from_str(&content)?)
}
