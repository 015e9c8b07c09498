// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Verification contract.
//!
//! A [`Verifier`] classifies either a single run or a whole workload into a
//! submission [`Category`] and explains the classification with a list of
//! [`Issue`]s. The reporting pipeline treats the verifier as a black box:
//! it never recomputes a workload category from the categories of its runs.
//!
//! [`StatusVerifier`] is the minimal verifier shipped with the tool. Rule
//! engines for a specific submission round implement [`Verifier`] instead.

use crate::run::RunRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Submission category, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Eligible for the closed division.
    Closed,
    /// Eligible for the open division only.
    Open,
    /// Not a valid submission.
    Invalid,
}

impl Category {
    /// Order in which categories are reported.
    pub const REPORT_ORDER: [Category; 3] = [Category::Closed, Category::Open, Category::Invalid];

    /// Lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Closed => "closed",
            Category::Open => "open",
            Category::Invalid => "invalid",
        }
    }
}

/// Displays the uppercase label used in reports, e.g. `CLOSED`.
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// A single verification finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Category this finding pushes the run or workload into.
    pub category: Category,
    /// Human-readable description.
    pub message: String,
    /// Parameter the finding is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Expected value of the parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Observed value of the parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl Issue {
    /// Create an issue with only a message.
    pub fn new(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            parameter: None,
            expected: None,
            actual: None,
        }
    }

    /// Attach the parameter the issue concerns.
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    /// Attach expected and observed values.
    pub fn with_values(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)?;
        if let Some(param) = &self.parameter {
            write!(f, " (parameter: {param}")?;
            if let Some(expected) = &self.expected {
                write!(f, ", expected: {expected}")?;
            }
            if let Some(actual) = &self.actual {
                write!(f, ", actual: {actual}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Outcome of verifying a run or a workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Assigned category.
    pub category: Category,
    /// Findings, in the order they were raised.
    pub issues: Vec<Issue>,
}

impl Verdict {
    /// A verdict with no findings.
    pub fn closed() -> Self {
        Self {
            category: Category::Closed,
            issues: Vec::new(),
        }
    }

    /// Verdict whose category is the most severe among `issues`.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let category = issues
            .iter()
            .map(|i| i.category)
            .max()
            .unwrap_or(Category::Closed);
        Self { category, issues }
    }
}

/// Classifies runs and workloads.
///
/// Implementations must be deterministic for a given input; the report
/// relies on the verdicts to order its output.
pub trait Verifier {
    /// Verify one run on its own.
    fn verify_run(&self, run: &RunRecord) -> Verdict;

    /// Verify all runs of one workload together.
    ///
    /// `runs` is never empty and is in discovery order.
    fn verify_workload(&self, runs: &[Arc<RunRecord>]) -> Verdict;
}

impl<V: Verifier + ?Sized> Verifier for &V {
    fn verify_run(&self, run: &RunRecord) -> Verdict {
        (**self).verify_run(run)
    }

    fn verify_workload(&self, runs: &[Arc<RunRecord>]) -> Verdict {
        (**self).verify_workload(runs)
    }
}

impl<V: Verifier + ?Sized> Verifier for Box<V> {
    fn verify_run(&self, run: &RunRecord) -> Verdict {
        (**self).verify_run(run)
    }

    fn verify_workload(&self, runs: &[Arc<RunRecord>]) -> Verdict {
        (**self).verify_workload(runs)
    }
}

/// Verifier that only looks at run status and parameter overrides.
///
/// - a failed run is INVALID
/// - each overridden parameter makes a run OPEN
/// - a workload mixing benchmark types or commands is INVALID
/// - otherwise a workload takes the most severe verdict of its runs
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusVerifier;

impl StatusVerifier {
    /// Create the verifier.
    pub fn new() -> Self {
        Self
    }

    fn run_issues(run: &RunRecord) -> Vec<Issue> {
        let mut issues = Vec::new();
        if run.is_failed() {
            issues.push(Issue::new(
                Category::Invalid,
                "Run failed: no benchmark summary was found",
            ));
        }
        for (param, value) in &run.override_parameters {
            let expected = run
                .parameters
                .get(param)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "default".to_string());
            issues.push(
                Issue::new(Category::Open, "Parameter overridden on the command line")
                    .with_parameter(param.clone())
                    .with_values(expected, value.to_string()),
            );
        }
        issues
    }
}

impl Verifier for StatusVerifier {
    fn verify_run(&self, run: &RunRecord) -> Verdict {
        let verdict = Verdict::from_issues(Self::run_issues(run));
        debug!(
            run_id = %run.run_id,
            category = %verdict.category,
            issues = verdict.issues.len(),
            "Verified run"
        );
        verdict
    }

    fn verify_workload(&self, runs: &[Arc<RunRecord>]) -> Verdict {
        let mut issues = Vec::new();
        if let Some(first) = runs.first() {
            for run in &runs[1..] {
                if run.benchmark_type != first.benchmark_type {
                    issues.push(
                        Issue::new(Category::Invalid, "Workload mixes benchmark types")
                            .with_parameter("benchmark_type")
                            .with_values(first.benchmark_type.as_str(), run.benchmark_type.as_str()),
                    );
                }
                if run.command != first.command {
                    issues.push(
                        Issue::new(Category::Invalid, "Workload mixes benchmark commands")
                            .with_parameter("command")
                            .with_values(first.command.clone(), run.command.clone()),
                    );
                }
            }
        }
        for run in runs {
            for mut issue in Self::run_issues(run) {
                issue.message = format!("{}: {}", run.run_id, issue.message);
                issues.push(issue);
            }
        }
        let verdict = Verdict::from_issues(issues);
        debug!(
            runs = runs.len(),
            category = %verdict.category,
            issues = verdict.issues.len(),
            "Verified workload"
        );
        verdict
    }
}
