// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Report model.
//!
//! A [`ReportModel`] is what aggregation produces and what both renderers
//! read: one [`ReportEntry`] per run and one per workload. It cannot be
//! modified once built.

use indexmap::IndexMap;
use mlps_report_core::flatten::{self, FlatRecord};
use mlps_report_core::{
    BenchmarkType, Category, Issue, Metrics, RunId, RunRecord, Verdict, WorkloadKey,
};
use std::collections::BTreeSet;
use std::sync::Arc;

/// The run or runs a [`ReportEntry`] describes.
#[derive(Debug, Clone, PartialEq)]
pub enum RunSet {
    /// Exactly one run.
    Single(Arc<RunRecord>),
    /// All runs of a workload, in discovery order.
    Workload(Vec<Arc<RunRecord>>),
}

impl RunSet {
    /// Runs as a slice.
    pub fn records(&self) -> &[Arc<RunRecord>] {
        match self {
            RunSet::Single(run) => std::slice::from_ref(run),
            RunSet::Workload(runs) => runs,
        }
    }

    /// First run of the set.
    pub fn first(&self) -> Option<&Arc<RunRecord>> {
        self.records().first()
    }
}

/// Classification of one run or one workload.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    /// Benchmark type of the (first) run.
    pub benchmark_type: BenchmarkType,
    /// Command of the (first) run.
    pub command: String,
    /// Model of the (first) run.
    pub model: String,
    /// Underlying runs.
    pub runs: RunSet,
    /// Findings raised by the verifier.
    pub issues: Vec<Issue>,
    /// Category assigned by the verifier.
    pub category: Category,
    /// Metrics of the run; always empty for workloads.
    pub metrics: Metrics,
}

impl ReportEntry {
    /// Entry for a single run.
    pub fn for_run(run: Arc<RunRecord>, verdict: Verdict) -> Self {
        Self {
            benchmark_type: run.benchmark_type,
            command: run.command.clone(),
            model: run.model.clone(),
            metrics: run.metrics.clone(),
            runs: RunSet::Single(run),
            issues: verdict.issues,
            category: verdict.category,
        }
    }

    /// Entry for a workload. Returns `None` when `runs` is empty.
    ///
    /// Descriptors are taken from the first run of the group.
    pub fn for_workload(runs: Vec<Arc<RunRecord>>, verdict: Verdict) -> Option<Self> {
        let first = runs.first()?.clone();
        Some(Self {
            benchmark_type: first.benchmark_type,
            command: first.command.clone(),
            model: first.model.clone(),
            runs: RunSet::Workload(runs),
            issues: verdict.issues,
            category: verdict.category,
            metrics: Metrics::new(),
        })
    }

    /// Whether this entry aggregates a workload rather than one run.
    pub fn is_workload_level(&self) -> bool {
        matches!(self.runs, RunSet::Workload(_))
    }
}

/// Run records shaped for the CSV report.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CsvTable {
    /// Sorted union of all flattened keys.
    pub header: Vec<String>,
    /// One flattened record per run, NaN leaves removed.
    pub rows: Vec<FlatRecord>,
}

/// Run-level and workload-level results of one reporting invocation.
#[derive(Debug, Clone, Default)]
pub struct ReportModel {
    run_results: IndexMap<RunId, ReportEntry>,
    workload_results: IndexMap<WorkloadKey, ReportEntry>,
}

impl ReportModel {
    pub(crate) fn new(
        run_results: IndexMap<RunId, ReportEntry>,
        workload_results: IndexMap<WorkloadKey, ReportEntry>,
    ) -> Self {
        Self {
            run_results,
            workload_results,
        }
    }

    /// Run-level entries keyed by run id, in discovery order.
    pub fn run_results(&self) -> &IndexMap<RunId, ReportEntry> {
        &self.run_results
    }

    /// Workload-level entries keyed by (model, accelerator), in first-seen order.
    pub fn workload_results(&self) -> &IndexMap<WorkloadKey, ReportEntry> {
        &self.workload_results
    }

    /// Run-level entries of one category, in discovery order.
    pub fn runs_in(&self, category: Category) -> impl Iterator<Item = &ReportEntry> + '_ {
        self.run_results
            .values()
            .filter(move |entry| entry.category == category)
    }

    /// Workload-level entries of one category, in first-seen order.
    pub fn workloads_in(
        &self,
        category: Category,
    ) -> impl Iterator<Item = (&WorkloadKey, &ReportEntry)> + '_ {
        self.workload_results
            .iter()
            .filter(move |(_, entry)| entry.category == category)
    }

    /// Category assigned to a single run.
    pub fn run_category(&self, run_id: &str) -> Option<Category> {
        self.run_results.get(run_id).map(|entry| entry.category)
    }

    /// Underlying records of the run-level entries, in discovery order.
    pub fn run_records(&self) -> Vec<&RunRecord> {
        self.run_results
            .values()
            .filter_map(|entry| entry.runs.first())
            .map(|run| run.as_ref())
            .collect()
    }

    /// Serializable form of each run record, as written to `results.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if a record fails to serialize.
    pub fn json_rows(&self) -> serde_json::Result<Vec<serde_json::Value>> {
        self.run_records()
            .into_iter()
            .map(serde_json::to_value)
            .collect()
    }

    /// Flattened run records with their column header.
    ///
    /// # Errors
    ///
    /// Returns an error if a record fails to serialize.
    pub fn csv_table(&self) -> serde_json::Result<CsvTable> {
        let rows: Vec<FlatRecord> = self
            .json_rows()?
            .iter()
            .map(|row| flatten::remove_nan_values(flatten::flatten(row)))
            .collect();
        let header: BTreeSet<&String> = rows.iter().flat_map(|row| row.keys()).collect();
        Ok(CsvTable {
            header: header.into_iter().cloned().collect(),
            rows,
        })
    }

    /// Number of run-level entries.
    pub fn len(&self) -> usize {
        self.run_results.len()
    }

    /// Whether no runs were reported.
    pub fn is_empty(&self) -> bool {
        self.run_results.is_empty()
    }
}
