// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Error taxonomy for harness runs.
//!
//! Every error is fatal: it aborts the remaining steps of a run, but the
//! finalization path (trace flush, model release) still executes. There are
//! no retries; deterministic single-pass simulation has no transient-failure
//! concept.

use thiserror::Error;

/// Model-reported internal inconsistency during evaluation.
#[derive(Debug, Clone, Error)]
#[error("simulation fault: {message}")]
pub struct SimulationFault {
    pub message: String,
}

impl SimulationFault {
    pub fn new(message: impl Into<String>) -> Self {
        SimulationFault {
            message: message.into(),
        }
    }
}

/// Errors surfaced by a simulation run.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The trace file could not be opened or written.
    #[error("trace i/o: {0}")]
    Io(#[from] std::io::Error),

    /// The model reported an inconsistency while evaluating.
    #[error(transparent)]
    Fault(#[from] SimulationFault),

    /// A port name did not resolve on the model.
    #[error("model {model:?} has no port named {port:?}")]
    UnknownPort { model: String, port: String },

    /// A write targeted a port that is not an input.
    #[error("port {port:?} is not an input")]
    NotAnInput { port: String },

    /// The run configuration is invalid.
    #[error("invalid run configuration: {0}")]
    Config(String),
}
