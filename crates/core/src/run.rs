// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark run records.
//!
//! A [`RunRecord`] describes one benchmark execution as discovered on disk:
//! the identity of the run (type, model, command, timestamp), the
//! parameters it was launched with, and the metrics its summary reported.
//! Records are created once by a run source and are read-only afterwards.
//!
//! # Workloads
//!
//! Runs sharing a [`WorkloadKey`] (model and accelerator) form one workload
//! and are verified together:
//!
//! ```text
//! (unet3d, h100)
//!   ├─ training_unet3d_run_20250101_120000
//!   ├─ training_unet3d_run_20250101_130000
//!   └─ ...
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier of a run.
pub type RunId = String;

/// Metric name to value, in the order the summary reported them.
pub type Metrics = IndexMap<String, MetricValue>;

/// Kind of benchmark a run executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkType {
    /// Training data-loading benchmark.
    Training,
    /// Checkpoint save/restore benchmark.
    Checkpointing,
    /// Vector database benchmark.
    VectorDatabase,
}

impl BenchmarkType {
    /// Identifier as it appears in metadata and run ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            BenchmarkType::Training => "training",
            BenchmarkType::Checkpointing => "checkpointing",
            BenchmarkType::VectorDatabase => "vector_database",
        }
    }
}

impl fmt::Display for BenchmarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BenchmarkType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "training" => Ok(BenchmarkType::Training),
            "checkpointing" => Ok(BenchmarkType::Checkpointing),
            "vector_database" => Ok(BenchmarkType::VectorDatabase),
            other => Err(crate::Error::unknown("benchmark type", other)),
        }
    }
}

/// Outcome of a run as far as discovery can tell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Metadata and summary were both found.
    #[default]
    Completed,
    /// The summary was missing or unreadable; only metadata is known.
    Failed,
}

/// A single metric value reported by a run summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// A single number.
    Scalar(f64),
    /// A sequence of numbers, e.g. one value per epoch.
    Series(Vec<f64>),
    /// Anything else; rendered by its JSON text.
    Opaque(serde_json::Value),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Scalar(v) => write!(f, "{v}"),
            MetricValue::Series(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            MetricValue::Opaque(serde_json::Value::String(s)) => f.write_str(s),
            MetricValue::Opaque(other) => write!(f, "{other}"),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Scalar(v)
    }
}

impl From<Vec<f64>> for MetricValue {
    fn from(values: Vec<f64>) -> Self {
        MetricValue::Series(values)
    }
}

/// Key identifying a workload: all runs of one model on one accelerator.
///
/// Checkpointing runs carry no accelerator, so their key holds `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkloadKey {
    /// Model identifier.
    pub model: String,
    /// Accelerator identifier, absent for non-accelerator workloads.
    pub accelerator: Option<String>,
}

impl WorkloadKey {
    /// Create a key.
    pub fn new(model: impl Into<String>, accelerator: Option<String>) -> Self {
        Self {
            model: model.into(),
            accelerator,
        }
    }
}

impl fmt::Display for WorkloadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.accelerator {
            Some(acc) => write!(f, "({}, {})", self.model, acc),
            None => write!(f, "({}, none)", self.model),
        }
    }
}

/// One discovered benchmark execution.
///
/// The serde representation of this struct is what the JSON and CSV
/// reports contain for each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unique run identifier.
    pub run_id: RunId,
    /// Kind of benchmark.
    pub benchmark_type: BenchmarkType,
    /// Model identifier (raw, may be unknown to [`crate::Model`]).
    pub model: String,
    /// Benchmark command, e.g. `run` or `datagen`.
    pub command: String,
    /// Run timestamp as written in metadata (`%Y%m%d_%H%M%S`).
    pub run_datetime: String,
    /// Number of processes the benchmark was launched with.
    pub num_processes: Option<u32>,
    /// Accelerator identifier for training runs.
    pub accelerator: Option<String>,
    /// Whether the run produced a summary.
    pub status: RunStatus,
    /// Effective benchmark parameters.
    #[serde(default)]
    pub parameters: serde_json::Map<String, serde_json::Value>,
    /// Parameters overridden on the command line.
    #[serde(default)]
    pub override_parameters: serde_json::Map<String, serde_json::Value>,
    /// Host information captured at run time.
    #[serde(default)]
    pub system_info: serde_json::Map<String, serde_json::Value>,
    /// Metrics reported by the summary; empty for failed runs.
    #[serde(default)]
    pub metrics: Metrics,
}

impl RunRecord {
    /// Create a new builder.
    pub fn builder() -> RunRecordBuilder {
        RunRecordBuilder::default()
    }

    /// Canonical run id for the given identity fields.
    pub fn make_run_id(
        benchmark_type: BenchmarkType,
        model: &str,
        command: &str,
        run_datetime: &str,
    ) -> RunId {
        format!("{benchmark_type}_{model}_{command}_{run_datetime}")
    }

    /// Key of the workload this run belongs to.
    pub fn workload_key(&self) -> WorkloadKey {
        WorkloadKey::new(self.model.clone(), self.accelerator.clone())
    }

    /// Whether discovery marked this run as failed.
    pub fn is_failed(&self) -> bool {
        self.status == RunStatus::Failed
    }
}

/// Builder for [`RunRecord`] instances.
#[derive(Default)]
pub struct RunRecordBuilder {
    run_id: Option<RunId>,
    benchmark_type: Option<BenchmarkType>,
    model: Option<String>,
    command: Option<String>,
    run_datetime: Option<String>,
    num_processes: Option<u32>,
    accelerator: Option<String>,
    status: RunStatus,
    parameters: serde_json::Map<String, serde_json::Value>,
    override_parameters: serde_json::Map<String, serde_json::Value>,
    system_info: serde_json::Map<String, serde_json::Value>,
    metrics: Metrics,
}

impl RunRecordBuilder {
    /// Set the run id. Derived from the identity fields if not set.
    pub fn run_id(mut self, id: impl Into<RunId>) -> Self {
        self.run_id = Some(id.into());
        self
    }

    /// Set the benchmark type (required).
    pub fn benchmark_type(mut self, benchmark_type: BenchmarkType) -> Self {
        self.benchmark_type = Some(benchmark_type);
        self
    }

    /// Set the model (required).
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the command (required).
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set the run timestamp (required).
    pub fn run_datetime(mut self, run_datetime: impl Into<String>) -> Self {
        self.run_datetime = Some(run_datetime.into());
        self
    }

    /// Set the process count.
    pub fn num_processes(mut self, n: u32) -> Self {
        self.num_processes = Some(n);
        self
    }

    /// Set the accelerator.
    pub fn accelerator(mut self, accelerator: impl Into<String>) -> Self {
        self.accelerator = Some(accelerator.into());
        self
    }

    /// Set the accelerator from an optional value.
    pub fn maybe_accelerator(mut self, accelerator: Option<String>) -> Self {
        self.accelerator = accelerator;
        self
    }

    /// Set the status (default: Completed).
    pub fn status(mut self, status: RunStatus) -> Self {
        self.status = status;
        self
    }

    /// Replace the parameter map.
    pub fn parameters(mut self, parameters: serde_json::Map<String, serde_json::Value>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Add one overridden parameter.
    pub fn override_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.override_parameters.insert(key.into(), value);
        self
    }

    /// Replace the overridden parameter map.
    pub fn override_parameters(
        mut self,
        overrides: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.override_parameters = overrides;
        self
    }

    /// Replace the system info map.
    pub fn system_info(mut self, info: serde_json::Map<String, serde_json::Value>) -> Self {
        self.system_info = info;
        self
    }

    /// Add one metric.
    pub fn metric(mut self, name: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.metrics.insert(name.into(), value.into());
        self
    }

    /// Replace the metrics map.
    pub fn metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Build the [`RunRecord`]. Returns `Err` if required fields are missing.
    pub fn build(self) -> crate::Result<RunRecord> {
        let benchmark_type = self
            .benchmark_type
            .ok_or_else(|| crate::Error::invalid_input("benchmark_type is required"))?;
        let model = self
            .model
            .filter(|m| !m.is_empty())
            .ok_or_else(|| crate::Error::invalid_input("model is required"))?;
        let command = self
            .command
            .ok_or_else(|| crate::Error::invalid_input("command is required"))?;
        let run_datetime = self
            .run_datetime
            .filter(|d| !d.is_empty())
            .ok_or_else(|| crate::Error::invalid_input("run_datetime is required"))?;

        let run_id = self.run_id.unwrap_or_else(|| {
            RunRecord::make_run_id(benchmark_type, &model, &command, &run_datetime)
        });

        Ok(RunRecord {
            run_id,
            benchmark_type,
            model,
            command,
            run_datetime,
            num_processes: self.num_processes,
            accelerator: self.accelerator,
            status: self.status,
            parameters: self.parameters,
            override_parameters: self.override_parameters,
            system_info: self.system_info,
            metrics: self.metrics,
        })
    }
}
