// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-invocation reporting context.

use crate::error::{ReportError, Result};
use std::path::{Path, PathBuf};
use tracing::error;

/// Settings shared by discovery, aggregation and rendering for one
/// reporting invocation.
///
/// Construction validates the results directory, so holding a
/// `ReportContext` means the directory existed when the run started.
#[derive(Debug, Clone)]
pub struct ReportContext {
    results_dir: PathBuf,
    debug: bool,
}

impl ReportContext {
    /// Create a context for `results_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::ResultsDirNotFound`] if the path does not
    /// exist or is not a directory.
    pub fn new(results_dir: impl Into<PathBuf>, debug: bool) -> Result<Self> {
        let results_dir = results_dir.into();
        if !results_dir.is_dir() {
            error!(
                path = %results_dir.display(),
                "Results directory does not exist"
            );
            return Err(ReportError::ResultsDirNotFound(results_dir));
        }
        Ok(Self { results_dir, debug })
    }

    /// Directory holding the run artifacts and receiving the reports.
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Whether debug output was requested.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Path of a report file at the root of the results directory.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.results_dir.join(file_name)
    }
}
