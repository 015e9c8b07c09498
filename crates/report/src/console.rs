// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Human-readable console report.
//!
//! The report has two sections, each listing CLOSED, then OPEN, then
//! INVALID entries:
//!
//! - **Results Report**: one block per run with its issues and metrics
//! - **Submissions Report**: one block per workload with its member runs,
//!   each annotated with the run's own category
//!
//! Output order depends only on the categories and the discovery order,
//! never on hash ordering, so two reports over the same directory diff
//! cleanly.

use crate::format::format_metric;
use crate::result::{ReportEntry, ReportModel};
use mlps_report_core::{Category, Issue, WorkloadFamily};
use std::io::{self, Write};
use tracing::warn;

const SECTION_RULE: &str = "=========================";
const CATEGORY_RULE: &str = "-------------------------";

/// Write the full console report to `out`.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn write_report<W: Write>(out: &mut W, model: &ReportModel) -> io::Result<()> {
    write_run_report(out, model)?;
    write_workload_report(out, model)?;
    out.flush()
}

/// Render the full console report into a string.
pub fn render_report(model: &ReportModel) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec<u8> cannot fail.
    let _ = write_report(&mut buf, model);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Label of a workload in the submissions report.
///
/// Returns `None` when the model belongs to no known workload family.
pub fn workload_id(entry: &ReportEntry) -> Option<String> {
    match WorkloadFamily::of(&entry.model)? {
        WorkloadFamily::Checkpointing => Some(format!("Checkpointing - {}", entry.model)),
        WorkloadFamily::Training => {
            let accelerator = entry
                .runs
                .first()
                .and_then(|run| run.accelerator.as_deref())
                .unwrap_or("none");
            Some(format!(
                "Training - {}, Accelerator: {}",
                entry.model, accelerator
            ))
        }
    }
}

fn write_section_header<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{SECTION_RULE} {title} {SECTION_RULE}")
}

fn write_category_header<W: Write>(out: &mut W, category: Category) -> io::Result<()> {
    writeln!(out, "\n{CATEGORY_RULE} {category} Report {CATEGORY_RULE}")
}

fn write_issues<W: Write>(out: &mut W, issues: &[Issue]) -> io::Result<()> {
    if issues.is_empty() {
        return writeln!(out, "\t\t- No issues found");
    }
    writeln!(out, "\t    Issues:")?;
    for issue in issues {
        writeln!(out, "\t\t- {issue}")?;
    }
    Ok(())
}

fn write_run_report<W: Write>(out: &mut W, model: &ReportModel) -> io::Result<()> {
    write_section_header(out, "Results Report")?;
    for category in Category::REPORT_ORDER {
        write_category_header(out, category)?;
        for entry in model.runs_in(category) {
            let run_id = entry.runs.first().map(|r| r.run_id.as_str()).unwrap_or("");
            writeln!(out, "\tRunID: {run_id}")?;
            writeln!(out, "\t    Benchmark Type: {}", entry.benchmark_type)?;
            writeln!(out, "\t    Command: {}", entry.command)?;
            writeln!(out, "\t    Model: {}", entry.model)?;
            write_issues(out, &entry.issues)?;

            if !entry.metrics.is_empty() {
                writeln!(out, "\t    Metrics:")?;
                for (name, value) in &entry.metrics {
                    writeln!(out, "\t\t- {name}: {}", format_metric(name, value))?;
                }
            }
            writeln!(out, "\n")?;
        }
    }
    Ok(())
}

fn write_workload_report<W: Write>(out: &mut W, model: &ReportModel) -> io::Result<()> {
    write_section_header(out, "Submissions Report")?;
    for category in Category::REPORT_ORDER {
        write_category_header(out, category)?;
        for (key, entry) in model.workloads_in(category) {
            match workload_id(entry) {
                Some(id) => writeln!(out, "\tWorkloadID: {id}")?,
                None => {
                    warn!(workload = %key, "Unknown workload type: {}", entry.model);
                    writeln!(out, "\tUnknown workload type: {}", entry.model)?;
                }
            }
            writeln!(out, "\t    Benchmark Type: {}", entry.benchmark_type)?;
            if !entry.command.is_empty() {
                writeln!(out, "\t    Command: {}", entry.command)?;
            }

            writeln!(out, "\t    Runs: ")?;
            for run in entry.runs.records() {
                let run_category = model
                    .run_category(&run.run_id)
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "UNVERIFIED".to_string());
                writeln!(out, "\t\t- {} - [{}]", run.run_id, run_category)?;
            }

            write_issues(out, &entry.issues)?;
            writeln!(out, "\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregator;
    use mlps_report_core::{
        BenchmarkType, Issue, RunRecord, RunStatus, StatusVerifier, Verdict, Verifier,
    };
    use std::sync::Arc;

    fn make_run(model: &str, accelerator: Option<&str>, datetime: &str) -> RunRecord {
        RunRecord::builder()
            .benchmark_type(BenchmarkType::Training)
            .model(model)
            .command("run")
            .run_datetime(datetime)
            .maybe_accelerator(accelerator.map(str::to_string))
            .build()
            .unwrap()
    }

    #[test]
    fn test_run_report_lists_categories_in_order() {
        let mut failed = make_run("unet3d", Some("h100"), "20250101_120000");
        failed.status = RunStatus::Failed;
        let mut open = make_run("unet3d", Some("h100"), "20250101_130000");
        open.override_parameters
            .insert("reader.read_threads".to_string(), serde_json::json!(4));
        let closed = make_run("unet3d", Some("h100"), "20250101_140000");

        let model = Aggregator::new(StatusVerifier::new()).accumulate(vec![
            failed.clone(),
            open.clone(),
            closed.clone(),
        ]);
        let text = render_report(&model);

        let closed_pos = text.find(&format!("RunID: {}", closed.run_id)).unwrap();
        let open_pos = text.find(&format!("RunID: {}", open.run_id)).unwrap();
        let failed_pos = text.find(&format!("RunID: {}", failed.run_id)).unwrap();
        assert!(closed_pos < open_pos);
        assert!(open_pos < failed_pos);

        let submissions = text.find("Submissions Report").unwrap();
        assert!(failed_pos < submissions);
    }

    #[test]
    fn test_workload_report_lists_categories_in_order() {
        struct ByModel;
        impl Verifier for ByModel {
            fn verify_run(&self, _run: &RunRecord) -> Verdict {
                Verdict::closed()
            }
            fn verify_workload(&self, runs: &[Arc<RunRecord>]) -> Verdict {
                let category = match runs[0].model.as_str() {
                    "resnet50" => Category::Invalid,
                    "cosmoflow" => Category::Open,
                    _ => Category::Closed,
                };
                Verdict::from_issues(vec![Issue::new(category, "workload check")])
            }
        }

        let model = Aggregator::new(ByModel).accumulate(vec![
            make_run("resnet50", Some("h100"), "20250101_120000"),
            make_run("cosmoflow", Some("h100"), "20250101_130000"),
            make_run("unet3d", Some("h100"), "20250101_140000"),
        ]);
        let text = render_report(&model);
        let submissions = text.find("Submissions Report").unwrap();
        let workloads = &text[submissions..];

        let unet = workloads.find("Training - unet3d").unwrap();
        let cosmo = workloads.find("Training - cosmoflow").unwrap();
        let resnet = workloads.find("Training - resnet50").unwrap();
        assert!(unet < cosmo);
        assert!(cosmo < resnet);
    }

    #[test]
    fn test_run_block_formats_metrics_and_issues() {
        let run = RunRecord::builder()
            .benchmark_type(BenchmarkType::Training)
            .model("unet3d")
            .command("run")
            .run_datetime("20250101_120000")
            .accelerator("a100")
            .metric("read_throughput_percentage", 42.567)
            .metric("latency_ms", vec![1.0, 2.25])
            .build()
            .unwrap();
        let model = Aggregator::new(StatusVerifier::new()).accumulate(vec![run]);
        let text = render_report(&model);

        assert!(text.contains("\t\t- read_throughput_percentage: 42.6%\n"));
        assert!(text.contains("\t\t- latency_ms: 1.0, 2.3\n"));
        assert!(text.contains("\t\t- No issues found\n"));
        assert!(text.contains("\t    Benchmark Type: training\n"));
    }

    #[test]
    fn test_workload_block_annotates_member_categories() {
        let good = make_run("unet3d", Some("a100"), "20250101_120000");
        let mut bad = make_run("unet3d", Some("a100"), "20250101_130000");
        bad.status = RunStatus::Failed;
        let model =
            Aggregator::new(StatusVerifier::new()).accumulate(vec![good.clone(), bad.clone()]);
        let text = render_report(&model);

        assert!(text.contains("\tWorkloadID: Training - unet3d, Accelerator: a100\n"));
        assert!(text.contains(&format!("\t\t- {} - [CLOSED]\n", good.run_id)));
        assert!(text.contains(&format!("\t\t- {} - [INVALID]\n", bad.run_id)));
    }

    #[test]
    fn test_checkpointing_workload_id() {
        let run = RunRecord::builder()
            .benchmark_type(BenchmarkType::Checkpointing)
            .model("llama3-70b")
            .command("run")
            .run_datetime("20250101_120000")
            .build()
            .unwrap();
        let model = Aggregator::new(StatusVerifier::new()).accumulate(vec![run]);
        let text = render_report(&model);
        assert!(text.contains("\tWorkloadID: Checkpointing - llama3-70b\n"));
    }

    #[test]
    fn test_unknown_workload_does_not_stop_rendering() {
        let model = Aggregator::new(StatusVerifier::new()).accumulate(vec![
            make_run("bert", Some("h100"), "20250101_120000"),
            make_run("unet3d", Some("h100"), "20250101_130000"),
        ]);
        let text = render_report(&model);
        assert!(text.contains("Unknown workload type: bert"));
        assert!(!text.contains("WorkloadID: Training - bert"));
        assert!(text.contains("WorkloadID: Training - unet3d, Accelerator: h100"));
    }

    #[test]
    fn test_workload_id_uses_first_run_accelerator() {
        let run = Arc::new(make_run("resnet50", Some("h100"), "20250101_120000"));
        let entry = ReportEntry::for_workload(vec![run], Verdict::closed()).unwrap();
        assert_eq!(
            workload_id(&entry).as_deref(),
            Some("Training - resnet50, Accelerator: h100")
        );
    }
}
