// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while generating reports.

use mlps_report_core::ExitCode;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a reporting invocation.
///
/// Problems with a single run never surface here; the run source logs them
/// and moves on to the next run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The results directory passed to the tool does not exist.
    #[error("Results directory {} does not exist", .0.display())]
    ResultsDirNotFound(PathBuf),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// A report could not be serialized to JSON.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The CSV report could not be written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A benchmark summary is not valid JSON, even allowing non-finite numbers.
    #[error("Summary parse error: {0}")]
    Summary(#[from] json5::Error),
}

impl ReportError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        ReportError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Exit code the process should terminate with.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ReportError::ResultsDirNotFound(_) => ExitCode::FileNotFound,
            ReportError::Io { source, .. } => exit_code_for_io(source.kind()),
            ReportError::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(source) => exit_code_for_io(source.kind()),
                _ => ExitCode::GeneralError,
            },
            ReportError::Json(_) | ReportError::Summary(_) => ExitCode::GeneralError,
        }
    }
}

fn exit_code_for_io(kind: io::ErrorKind) -> ExitCode {
    match kind {
        io::ErrorKind::NotFound => ExitCode::FileNotFound,
        io::ErrorKind::PermissionDenied => ExitCode::PermissionDenied,
        _ => ExitCode::GeneralError,
    }
}

/// Result type for reporting operations.
pub type Result<T> = std::result::Result<T, ReportError>;
