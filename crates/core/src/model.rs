// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Known benchmark models and the workload family each belongs to.
//!
//! Run records carry the model as a raw string so that unknown models can
//! still be discovered, verified and written to the result files. Renderers
//! use [`WorkloadFamily::of`] to decide how a workload is labelled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Models recognised by the reporting tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    /// CosmoFlow training workload.
    #[serde(rename = "cosmoflow")]
    Cosmoflow,
    /// ResNet-50 training workload.
    #[serde(rename = "resnet50")]
    Resnet50,
    /// 3D U-Net training workload.
    #[serde(rename = "unet3d")]
    Unet3d,
    /// Llama 3 8B checkpointing workload.
    #[serde(rename = "llama3-8b")]
    Llama3_8b,
    /// Llama 3 70B checkpointing workload.
    #[serde(rename = "llama3-70b")]
    Llama3_70b,
    /// Llama 3 405B checkpointing workload.
    #[serde(rename = "llama3-405b")]
    Llama3_405b,
    /// Llama 3 1T checkpointing workload.
    #[serde(rename = "llama3-1t")]
    Llama3_1t,
}

/// Family a workload belongs to; drives how it is identified in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadFamily {
    /// Data-loading workloads, one workload per (model, accelerator).
    Training,
    /// Checkpoint write/read workloads, one workload per model.
    Checkpointing,
}

impl Model {
    /// Every known model, training models first.
    pub const ALL: [Model; 7] = [
        Model::Cosmoflow,
        Model::Resnet50,
        Model::Unet3d,
        Model::Llama3_8b,
        Model::Llama3_70b,
        Model::Llama3_405b,
        Model::Llama3_1t,
    ];

    /// Identifier as it appears in run metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Cosmoflow => "cosmoflow",
            Model::Resnet50 => "resnet50",
            Model::Unet3d => "unet3d",
            Model::Llama3_8b => "llama3-8b",
            Model::Llama3_70b => "llama3-70b",
            Model::Llama3_405b => "llama3-405b",
            Model::Llama3_1t => "llama3-1t",
        }
    }

    /// Workload family of this model.
    pub fn family(&self) -> WorkloadFamily {
        match self {
            Model::Cosmoflow | Model::Resnet50 | Model::Unet3d => WorkloadFamily::Training,
            Model::Llama3_8b | Model::Llama3_70b | Model::Llama3_405b | Model::Llama3_1t => {
                WorkloadFamily::Checkpointing
            }
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Model::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| crate::Error::unknown("model", s))
    }
}

impl WorkloadFamily {
    /// Look up the family of a raw model identifier.
    ///
    /// Returns `None` for models the reporting tool does not know about.
    pub fn of(model: &str) -> Option<Self> {
        model.parse::<Model>().ok().map(|m| m.family())
    }
}
