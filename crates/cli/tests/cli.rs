//! Process-level behaviour of the `mlps-report` binary.

use assert_cmd::Command;
use std::fs;

#[test]
fn reportgen_missing_dir_exits_with_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    Command::cargo_bin("mlps-report")
        .unwrap()
        .env_remove("MLPS_DEBUG")
        .args(["reportgen", "--results-dir"])
        .arg(&missing)
        .assert()
        .code(3);

    assert!(!missing.exists());
}

#[test]
fn reportgen_writes_reports() {
    let dir = tempfile::tempdir().unwrap();
    let run_dir = dir.path().join("training/unet3d/run/20250101_120000");
    fs::create_dir_all(&run_dir).unwrap();
    fs::write(
        run_dir.join("training_20250101_120000_metadata.json"),
        r#"{"benchmark_type": "training", "model": "unet3d", "command": "run",
            "run_datetime": "20250101_120000", "accelerator": "h100"}"#,
    )
    .unwrap();
    fs::write(
        run_dir.join("summary.json"),
        r#"{"metric": {"train_au_mean_percentage": 97.5}}"#,
    )
    .unwrap();

    let output = Command::cargo_bin("mlps-report")
        .unwrap()
        .args(["reportgen", "--results-dir"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("RunID: training_unet3d_run_20250101_120000"));
    assert!(stdout.contains("train_au_mean_percentage: 97.5%"));
    assert!(dir.path().join("results.json").exists());
    assert!(dir.path().join("results.csv").exists());
}
