// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Result accumulation.
//!
//! The [`Aggregator`] turns discovered run records into a [`ReportModel`]
//! in two passes:
//!
//! 1. every run is verified on its own and becomes a run-level entry
//! 2. runs are grouped by [`WorkloadKey`] and every group is verified as a
//!    whole, becoming a workload-level entry
//!
//! The category of a workload is whatever the verifier says about the whole
//! group. It is never derived from the categories of its runs.

use crate::result::{ReportEntry, ReportModel};
use indexmap::IndexMap;
use mlps_report_core::{RunId, RunRecord, Verifier, WorkloadKey};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, trace, warn};

/// Builds a [`ReportModel`] by running a [`Verifier`] over run records.
#[derive(Debug, Clone, Default)]
pub struct Aggregator<V> {
    verifier: V,
}

impl<V: Verifier> Aggregator<V> {
    /// Create an aggregator using `verifier`.
    pub fn new(verifier: V) -> Self {
        Self { verifier }
    }

    /// The verifier in use.
    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Verify `records` individually and per workload.
    ///
    /// A record whose run id was already seen is logged and skipped; it
    /// joins neither the run-level nor the workload-level results.
    pub fn accumulate(&self, records: Vec<RunRecord>) -> ReportModel {
        info!("Accumulating results from {} runs", records.len());
        let runs = dedupe(records);

        let mut run_results: IndexMap<RunId, ReportEntry> = IndexMap::with_capacity(runs.len());
        for run in &runs {
            trace!(run = ?run, "Processing run");
            let verdict = self.verifier.verify_run(run);
            run_results.insert(run.run_id.clone(), ReportEntry::for_run(run.clone(), verdict));
        }

        let mut workload_results = IndexMap::new();
        for (key, group) in group_by_workload(&runs) {
            if group.is_empty() {
                continue;
            }
            info!(
                "Running additional verifiers for model: {}, accelerator: {}",
                key.model,
                key.accelerator.as_deref().unwrap_or("none")
            );
            let verdict = self.verifier.verify_workload(&group);
            if let Some(entry) = ReportEntry::for_workload(group, verdict) {
                workload_results.insert(key, entry);
            }
        }

        ReportModel::new(run_results, workload_results)
    }
}

fn dedupe(records: Vec<RunRecord>) -> Vec<Arc<RunRecord>> {
    let mut seen: HashSet<RunId> = HashSet::with_capacity(records.len());
    let mut runs = Vec::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.run_id.clone()) {
            warn!(
                run_id = %record.run_id,
                "Duplicate run id, keeping the first run and skipping this one"
            );
            continue;
        }
        runs.push(Arc::new(record));
    }
    runs
}

/// Group runs by (model, accelerator), keeping first-seen key order and
/// discovery order within each group.
pub fn group_by_workload(runs: &[Arc<RunRecord>]) -> IndexMap<WorkloadKey, Vec<Arc<RunRecord>>> {
    let mut groups: IndexMap<WorkloadKey, Vec<Arc<RunRecord>>> = IndexMap::new();
    for run in runs {
        groups.entry(run.workload_key()).or_default().push(run.clone());
    }
    groups
}
