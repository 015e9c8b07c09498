// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Result accumulation and reporting for MLPerf Storage benchmark runs.
//!
//! This crate turns a results directory into a classified report:
//!
//! ```text
//! RunSource ──► Aggregator (Verifier) ──► ReportModel ──┬─► console report
//!                                                      └─► results.json / results.csv
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use mlps_report::{generate_reports, ReportContext};
//!
//! let ctx = ReportContext::new("/data/mlperf/results", false)?;
//! let code = generate_reports(ctx, &mut std::io::stdout())?;
//! assert!(code.is_success());
//! # Ok::<(), mlps_report::ReportError>(())
//! ```
//!
//! # Modules
//!
//! - [`source`] - run discovery
//! - [`aggregate`] - run-level and workload-level verification
//! - [`result`] - the report model shared by the renderers
//! - [`console`] - human-readable report
//! - [`io`] - `results.json` and `results.csv`
//! - [`format`] - metric value formatting

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod console;
pub mod context;
pub mod error;
pub mod format;
pub mod io;
pub mod result;
pub mod source;

pub use aggregate::Aggregator;
pub use context::ReportContext;
pub use error::{ReportError, Result};
pub use result::{ReportEntry, ReportModel, RunSet};
pub use source::{DirectoryRunSource, RunSource};

use mlps_report_core::{ExitCode, StatusVerifier, Verifier};
use std::io::Write;
use tracing::info;

/// Drives one reporting invocation: discovery, aggregation, console report
/// and report files.
pub struct ReportGenerator<S, V> {
    ctx: ReportContext,
    source: S,
    aggregator: Aggregator<V>,
}

impl<S: RunSource, V: Verifier> ReportGenerator<S, V> {
    /// Create a generator for an already validated context.
    pub fn new(ctx: ReportContext, source: S, verifier: V) -> Self {
        Self {
            ctx,
            source,
            aggregator: Aggregator::new(verifier),
        }
    }

    /// Discover and verify all runs.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery as a whole fails.
    pub fn accumulate(&self) -> Result<ReportModel> {
        let records = self.source.discover(&self.ctx)?;
        Ok(self.aggregator.accumulate(records))
    }

    /// Run the whole pipeline, printing the console report to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails or a report cannot be written.
    pub fn generate<W: Write>(&self, out: &mut W) -> Result<ExitCode> {
        info!(
            debug = self.ctx.debug(),
            "Reporting on {}",
            self.ctx.results_dir().display()
        );
        let model = self.accumulate()?;
        console::write_report(out, &model).map_err(|e| ReportError::io("<console>", e))?;
        io::write_reports(&self.ctx, &model)?;
        Ok(ExitCode::Success)
    }
}

/// Generate reports for `ctx` with the directory source and the default
/// verifier.
///
/// # Errors
///
/// See [`ReportGenerator::generate`].
pub fn generate_reports<W: Write>(ctx: ReportContext, out: &mut W) -> Result<ExitCode> {
    ReportGenerator::new(ctx, DirectoryRunSource::new(), StatusVerifier::new()).generate(out)
}
