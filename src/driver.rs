// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Bounded clock-driven simulation loop.
//!
//! [`Driver`] owns one model instance and one trace recorder for the
//! duration of a run. A run is three phases in straight-line order:
//! initialize (reset-idle inputs, open the trace), step (toggle clock →
//! evaluate → record, bounded by the step budget), finalize (flush and close
//! the trace, release the model). The finalize phase runs on every exit
//! path, including fatal errors raised mid-loop.

use std::path::PathBuf;

use vcd_ng::TimescaleUnit;

use crate::error::HarnessError;
use crate::logic::Logic;
use crate::model::Model;
use crate::trace::TraceRecorder;

/// Reset sequencing for a run.
#[derive(Debug, Clone)]
pub struct ResetSpec {
    /// Name of the reset input port.
    pub port: String,
    /// Level that holds the design in reset.
    pub active_high: bool,
    /// Steps to hold reset asserted before releasing it.
    pub cycles: u64,
}

impl ResetSpec {
    fn asserted(&self) -> Logic {
        Logic::from(self.active_high)
    }

    fn deasserted(&self) -> Logic {
        Logic::from(!self.active_high)
    }
}

/// Description of one bounded simulation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Upper bound on simulation steps. One step is one clock toggle plus
    /// the following evaluation and trace sample.
    pub steps: u64,
    /// Output waveform path.
    pub trace_path: PathBuf,
    /// Name of the clock input port.
    pub clock_port: String,
    /// Optional reset sequencing. Without it, whatever level the model
    /// constructed its reset port at stays applied for the whole run.
    pub reset: Option<ResetSpec>,
    /// VCD timescale; one step advances logical time by one unit.
    pub timescale: (u32, TimescaleUnit),
}

impl RunConfig {
    pub fn new(steps: u64, trace_path: impl Into<PathBuf>) -> Self {
        RunConfig {
            steps,
            trace_path: trace_path.into(),
            clock_port: "clk_i".to_string(),
            reset: None,
            timescale: (1, TimescaleUnit::NS),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    pub steps_executed: u64,
    /// One sample per executed step plus the initial pre-loop sample.
    pub samples_written: u64,
    /// True when the model signaled completion before the budget ran out.
    pub finished: bool,
    pub trace_path: PathBuf,
}

/// Owns a model instance and drives it through a bounded clock sequence.
pub struct Driver<M: Model> {
    model: M,
    config: RunConfig,
}

impl<M: Model> Driver<M> {
    pub fn new(model: M, config: RunConfig) -> Self {
        Driver { model, config }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    /// Execute the run.
    ///
    /// Returns the summary, or the first error encountered. A stepping
    /// error takes precedence over a close error; the close is attempted
    /// regardless.
    pub fn run(&mut self) -> Result<RunSummary, HarnessError> {
        if self.config.steps == 0 {
            return Err(HarnessError::Config("step limit must be positive".into()));
        }

        // Initializing: clock low, reset asserted, then open the trace
        // output. Opening happens before the settle evaluation so an
        // unwritable path aborts with zero evaluation side effects.
        self.model.write(&self.config.clock_port, Logic::Zero)?;
        if let Some(reset) = &self.config.reset {
            self.model.write(&reset.port, reset.asserted())?;
        }
        let mut recorder = TraceRecorder::create(&self.config.trace_path)?;
        recorder.bind(&self.model, self.config.timescale)?;
        clilog::info!(
            "starting run: {} max, model {}, trace {:?}",
            self.config.steps,
            self.model.name(),
            self.config.trace_path
        );

        // Stepping, then finalizing. `finish` consumes the recorder, so it
        // closes exactly once whichever way the loop ended; an early abort
        // before this point still flushes through the buffer's own drop.
        let stepped = Self::step_loop(&mut self.model, &mut recorder, &self.config);
        let closed = recorder.finish();
        let (steps_executed, finished) = stepped?;
        closed?;

        clilog::info!(
            "run complete: {} steps, finished={}",
            steps_executed,
            finished
        );
        Ok(RunSummary {
            steps_executed,
            samples_written: steps_executed + 1,
            finished,
            trace_path: self.config.trace_path.clone(),
        })
    }

    fn step_loop(
        model: &mut M,
        recorder: &mut TraceRecorder,
        config: &RunConfig,
    ) -> Result<(u64, bool), HarnessError> {
        // Settle combinational state before the first sample.
        model.eval()?;
        recorder.sample(0, model)?;

        let mut counter: u64 = 0;
        while !model.finished() && counter < config.steps {
            let clk = model.read(&config.clock_port)?;
            model.write(&config.clock_port, !clk)?;
            if let Some(reset) = &config.reset {
                if counter == reset.cycles {
                    model.write(&reset.port, reset.deasserted())?;
                }
            }
            model.eval()?;
            counter += 1;
            recorder.sample(counter, model)?;
        }
        Ok((counter, model.finished()))
    }
}
