// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Report files.
//!
//! This module writes the run-level results to the root of the results
//! directory:
//!
//! - `results.json` - array of run records, pretty-printed
//! - `results.csv` - one flattened row per run, sorted column header

use crate::context::ReportContext;
use crate::error::{ReportError, Result};
use crate::result::{CsvTable, ReportModel};
use mlps_report_core::flatten::cell_text;
use std::fs::{self, File};
use std::path::Path;
use tracing::info;

/// Name of the JSON report file.
pub const RESULTS_JSON: &str = "results.json";

/// Name of the CSV report file.
pub const RESULTS_CSV: &str = "results.csv";

/// Write both report files for `model`.
///
/// # Errors
///
/// Any failure to serialize or write is returned; nothing useful can be
/// reported after it.
pub fn write_reports(ctx: &ReportContext, model: &ReportModel) -> Result<()> {
    info!("Generating reports for {}", ctx.results_dir().display());
    write_csv_file(ctx.output_path(RESULTS_CSV), &model.csv_table()?)?;
    write_json_file(ctx.output_path(RESULTS_JSON), model)?;
    Ok(())
}

/// Write the run records of `model` to a JSON file.
pub fn write_json_file(path: impl AsRef<Path>, model: &ReportModel) -> Result<()> {
    let path = path.as_ref();
    info!("Writing results to {}", path.display());
    let content = serde_json::to_vec_pretty(&model.run_records())?;
    fs::write(path, content).map_err(|e| ReportError::io(path, e))
}

/// Write a flattened table to a CSV file.
///
/// Cells for keys a row does not have are left blank. A table without
/// columns produces an empty file.
pub fn write_csv_file(path: impl AsRef<Path>, table: &CsvTable) -> Result<()> {
    let path = path.as_ref();
    info!("Writing results to {}", path.display());
    let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    if !table.header.is_empty() {
        writer.write_record(&table.header)?;
        for row in &table.rows {
            writer.write_record(
                table
                    .header
                    .iter()
                    .map(|key| row.get(key).map(cell_text).unwrap_or_default()),
            )?;
        }
    }
    writer.flush().map_err(|e| ReportError::io(path, e))
}

/// Read a `results.json` file back as JSON values.
pub fn read_results_json(path: impl AsRef<Path>) -> Result<Vec<serde_json::Value>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}
