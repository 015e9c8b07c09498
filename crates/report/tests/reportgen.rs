// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! End-to-end report generation over an on-disk results directory.

use mlps_report::io::{read_results_json, RESULTS_CSV, RESULTS_JSON};
use mlps_report::{
    generate_reports, DirectoryRunSource, ReportContext, ReportError, ReportGenerator,
};
use mlps_report_core::flatten::{cell_text, flatten, remove_nan_values};
use mlps_report_core::{Category, ExitCode, Issue, RunRecord, Verdict, Verifier, WorkloadKey};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn write_run(
    root: &Path,
    model: &str,
    accelerator: Option<&str>,
    datetime: &str,
    metrics: Option<serde_json::Value>,
) {
    let benchmark_type = if accelerator.is_some() {
        "training"
    } else {
        "checkpointing"
    };
    let dir = root.join(benchmark_type).join(model).join("run").join(datetime);
    fs::create_dir_all(&dir).unwrap();

    let mut metadata = json!({
        "benchmark_type": benchmark_type,
        "model": model,
        "command": "run",
        "run_datetime": datetime,
        "num_processes": 8,
        "parameters": {"dataset": {"num_files_train": 42000}, "reader": {"read_threads": 8}},
        "system_info": {"host_count": 2},
    });
    if let Some(acc) = accelerator {
        metadata["accelerator"] = json!(acc);
    }
    fs::write(
        dir.join(format!("{benchmark_type}_{datetime}_metadata.json")),
        serde_json::to_string_pretty(&metadata).unwrap(),
    )
    .unwrap();

    if let Some(metrics) = metrics {
        fs::write(
            dir.join("summary.json"),
            json!({"metric": metrics, "start": "2025-01-01T12:00:00"}).to_string(),
        )
        .unwrap();
    }
}

fn populate(root: &Path) {
    write_run(
        root,
        "unet3d",
        Some("h100"),
        "20250101_120000",
        Some(json!({
            "train_au_percentage": [98.2, 97.95],
            "train_au_mean_percentage": 98.075,
            "train_throughput_samples_per_second": 1234.56,
        })),
    );
    write_run(
        root,
        "unet3d",
        Some("h100"),
        "20250101_130000",
        Some(json!({"train_au_mean_percentage": 91.0})),
    );
    write_run(root, "unet3d", Some("a100"), "20250101_140000", None);
    write_run(
        root,
        "llama3-8b",
        None,
        "20250101_150000",
        Some(json!({"save_throughput_GBps": 12.5})),
    );
}

#[test]
fn generates_console_report_and_files() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());

    let ctx = ReportContext::new(dir.path(), false).unwrap();
    let mut out = Vec::new();
    let code = generate_reports(ctx, &mut out).unwrap();
    assert_eq!(code, ExitCode::Success);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\t\t- train_au_percentage: 98.2%, 98.0%\n"));
    assert!(text.contains("\t\t- train_throughput_samples_per_second: 1,234.6\n"));
    assert!(text.contains("\tWorkloadID: Training - unet3d, Accelerator: h100\n"));
    assert!(text.contains("\tWorkloadID: Training - unet3d, Accelerator: a100\n"));
    assert!(text.contains("\tWorkloadID: Checkpointing - llama3-8b\n"));

    // The a100 run has no summary, so it and its workload are INVALID.
    let invalid = text.find("INVALID Report").unwrap();
    let a100_run = text.find("RunID: training_unet3d_run_20250101_140000").unwrap();
    let h100_run = text.find("RunID: training_unet3d_run_20250101_120000").unwrap();
    assert!(h100_run < invalid);
    assert!(invalid < a100_run);

    let rows = read_results_json(dir.path().join(RESULTS_JSON)).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2]["status"], "failed");
}

#[test]
fn csv_columns_match_flattened_json() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());
    let ctx = ReportContext::new(dir.path(), false).unwrap();
    generate_reports(ctx, &mut Vec::new()).unwrap();

    let json_rows = read_results_json(dir.path().join(RESULTS_JSON)).unwrap();
    let mut reader = csv::Reader::from_path(dir.path().join(RESULTS_CSV)).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    let csv_rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(csv_rows.len(), json_rows.len());

    for (json_row, csv_row) in json_rows.iter().zip(&csv_rows) {
        let flat = remove_nan_values(flatten(json_row));
        for (key, value) in &flat {
            let col = header
                .iter()
                .position(|h| h == key)
                .unwrap_or_else(|| panic!("missing column {key}"));
            assert_eq!(csv_row[col], cell_text(value), "column {key}");
        }
        for (col, key) in header.iter().enumerate() {
            if !flat.contains_key(key) {
                assert_eq!(&csv_row[col], "", "column {key} should be blank");
            }
        }
    }
}

#[test]
fn nan_metric_keeps_run_completed_and_blanks_its_cell() {
    let dir = tempfile::tempdir().unwrap();
    write_run(dir.path(), "unet3d", Some("h100"), "20250101_120000", Some(json!({})));
    let summary = dir
        .path()
        .join("training/unet3d/run/20250101_120000")
        .join("summary.json");
    fs::write(
        &summary,
        r#"{"metric": {"train_au_percentage": 98.5, "io_time_std": NaN}}"#,
    )
    .unwrap();
    write_run(
        dir.path(),
        "unet3d",
        Some("h100"),
        "20250101_130000",
        Some(json!({"train_au_percentage": 97.0, "io_time_std": 0.25})),
    );

    let ctx = ReportContext::new(dir.path(), false).unwrap();
    let mut out = Vec::new();
    generate_reports(ctx, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("[INVALID]"));
    assert!(text.contains("\t\t- io_time_std: nan\n"));

    let rows = read_results_json(dir.path().join(RESULTS_JSON)).unwrap();
    assert_eq!(rows[0]["status"], "completed");
    assert!(rows[0]["metrics"]["io_time_std"].is_null());

    let mut reader = csv::Reader::from_path(dir.path().join(RESULTS_CSV)).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    let col = header.iter().position(|h| h == "metrics.io_time_std").unwrap();
    let au = header
        .iter()
        .position(|h| h == "metrics.train_au_percentage")
        .unwrap();
    let csv_rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(&csv_rows[0][col], "");
    assert_eq!(&csv_rows[0][au], "98.5");
    assert_eq!(&csv_rows[1][col], "0.25");
}

#[test]
fn missing_results_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    match ReportContext::new(&missing, true) {
        Err(err @ ReportError::ResultsDirNotFound(_)) => {
            assert_eq!(err.exit_code(), ExitCode::FileNotFound);
        }
        other => panic!("expected ResultsDirNotFound, got {other:?}"),
    }
    assert!(!missing.join(RESULTS_JSON).exists());
}

/// Verifier with fixed answers, standing in for a round-specific rules engine.
struct CombinedJudgment;

impl Verifier for CombinedJudgment {
    fn verify_run(&self, run: &RunRecord) -> Verdict {
        if run.run_datetime == "20250101_130000" {
            Verdict::from_issues(vec![Issue::new(Category::Invalid, "missing checksum")])
        } else {
            Verdict::closed()
        }
    }

    fn verify_workload(&self, runs: &[Arc<RunRecord>]) -> Verdict {
        Verdict::from_issues(vec![Issue::new(
            Category::Open,
            format!("{} runs checked together", runs.len()),
        )])
    }
}

#[test]
fn workload_category_comes_from_combined_verification() {
    let dir = tempfile::tempdir().unwrap();
    write_run(dir.path(), "unet3d", Some("a100"), "20250101_120000", Some(json!({})));
    write_run(dir.path(), "unet3d", Some("a100"), "20250101_130000", Some(json!({})));

    let ctx = ReportContext::new(dir.path(), false).unwrap();
    let generator = ReportGenerator::new(ctx, DirectoryRunSource::new(), CombinedJudgment);
    let model = generator.accumulate().unwrap();

    let categories: Vec<Category> = model.run_results().values().map(|e| e.category).collect();
    assert_eq!(categories, [Category::Closed, Category::Invalid]);

    let workload = &model.workload_results()[&WorkloadKey::new("unet3d", Some("a100".into()))];
    assert_eq!(workload.category, Category::Open);
    assert_eq!(workload.issues.len(), 1);
    assert_eq!(workload.issues[0].message, "2 runs checked together");
    assert_eq!(workload.runs.records().len(), 2);
}
