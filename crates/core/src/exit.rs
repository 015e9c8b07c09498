// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Process exit codes.

use serde::{Deserialize, Serialize};

/// Exit status returned by the reporting entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ExitCode {
    /// Reports were generated.
    Success = 0,
    /// Any failure without a more specific code.
    GeneralError = 1,
    /// Command-line arguments could not be used.
    InvalidArguments = 2,
    /// The results directory (or another required path) does not exist.
    FileNotFound = 3,
    /// The OS refused access to a required path.
    PermissionDenied = 4,
}

impl ExitCode {
    /// Numeric code handed to the operating system.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Whether this code signals success.
    pub fn is_success(self) -> bool {
        self == ExitCode::Success
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::FileNotFound.code(), 3);
        assert!(ExitCode::Success.is_success());
        assert!(!ExitCode::FileNotFound.is_success());
    }
}
