// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Testbench run configuration loaded from JSON.
//!
//! Describes one harness run: which ports carry clock and reset, the reset
//! polarity and duration, the step budget, and the trace output path.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::driver::{ResetSpec, RunConfig};
use crate::error::HarnessError;

/// Testbench configuration loaded from JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestbenchConfig {
    /// Name of the clock input port.
    #[serde(default = "default_clock_port")]
    pub clock_port: String,
    /// Name of the reset input port; omit to leave reset untouched.
    pub reset_port: Option<String>,
    #[serde(default)]
    pub reset_active_high: bool,
    /// Steps to hold reset asserted before releasing it.
    #[serde(default)]
    pub reset_cycles: u64,
    /// Step budget for the run.
    #[serde(default = "default_num_steps")]
    pub num_steps: u64,
    /// Trace output path; falls back to the caller's default when omitted.
    pub trace_path: Option<PathBuf>,
}

fn default_clock_port() -> String {
    "clk_i".to_string()
}

fn default_num_steps() -> u64 {
    1000
}

impl TestbenchConfig {
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let file = File::open(path)?;
        let config: TestbenchConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| HarnessError::Config(format!("{}: {}", path.display(), e)))?;
        if config.num_steps == 0 {
            return Err(HarnessError::Config(
                "num_steps must be positive".to_string(),
            ));
        }
        Ok(config)
    }

    /// Convert into a run configuration; `default_trace` is used when the
    /// config does not name a trace path.
    pub fn to_run_config(&self, default_trace: &Path) -> RunConfig {
        let mut config = RunConfig::new(
            self.num_steps,
            self.trace_path
                .clone()
                .unwrap_or_else(|| default_trace.to_owned()),
        );
        config.clock_port = self.clock_port.clone();
        if let Some(port) = &self.reset_port {
            config.reset = Some(ResetSpec {
                port: port.clone(),
                active_high: self.reset_active_high,
                cycles: self.reset_cycles,
            });
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let config: TestbenchConfig = serde_json::from_str(
            r#"{
                "clock_port": "clk",
                "reset_port": "rst_n",
                "reset_active_high": false,
                "reset_cycles": 4,
                "num_steps": 2000,
                "trace_path": "out/run.vcd"
            }"#,
        )
        .unwrap();
        assert_eq!(config.clock_port, "clk");
        assert_eq!(config.reset_cycles, 4);

        let run = config.to_run_config(Path::new("default.vcd"));
        assert_eq!(run.steps, 2000);
        assert_eq!(run.trace_path, PathBuf::from("out/run.vcd"));
        let reset = run.reset.expect("reset spec");
        assert_eq!(reset.port, "rst_n");
        assert!(!reset.active_high);
    }

    #[test]
    fn test_defaults_apply() {
        let config: TestbenchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.clock_port, "clk_i");
        assert_eq!(config.num_steps, 1000);
        assert!(config.reset_port.is_none());

        let run = config.to_run_config(Path::new("default.vcd"));
        assert!(run.reset.is_none());
        assert_eq!(run.trace_path, PathBuf::from("default.vcd"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<TestbenchConfig, _> =
            serde_json::from_str(r#"{"num_cycles": 10}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_step_budget_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tb.json");
        std::fs::write(&path, r#"{"num_steps": 0}"#).unwrap();
        assert!(matches!(
            TestbenchConfig::from_file(&path).unwrap_err(),
            HarnessError::Config(_)
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            TestbenchConfig::from_file(Path::new("/no/such/tb.json")).unwrap_err(),
            HarnessError::Io(_)
        ));
    }
}
