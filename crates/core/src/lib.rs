// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core types for MLPerf Storage results reporting.
//!
//! This crate holds the data contract shared by run discovery, verification
//! and report rendering:
//!
//! - [`run`] - benchmark run records and their metric values
//! - [`model`] - known models and the workload family each belongs to
//! - [`verify`] - compliance categories, issues and the [`Verifier`] trait
//! - [`flatten`] - flattening of nested JSON into dotted keys for tabular output
//! - [`exit`] - process exit codes

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod exit;
pub mod flatten;
pub mod model;
pub mod run;
pub mod verify;

pub use exit::ExitCode;
pub use model::{Model, WorkloadFamily};
pub use run::{BenchmarkType, MetricValue, Metrics, RunId, RunRecord, RunStatus, WorkloadKey};
pub use verify::{Category, Issue, StatusVerifier, Verdict, Verifier};

/// Errors raised while constructing or parsing core types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field was missing or a value was out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A string did not name a known variant of an enumeration.
    #[error("Unknown {kind}: {value}")]
    UnknownVariant {
        /// Name of the enumeration being parsed.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl Error {
    /// Build an [`Error::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub(crate) fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Error::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
