// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Strobe — clock-driven simulation harness with VCD tracing.
//!
//! Strobe owns the lifecycle of one simulation model instance and one
//! waveform trace recorder, drives a bounded clock sequence through the
//! model, and guarantees clean shutdown regardless of how the run ends.
//!
//! # Run sequence
//!
//! ```text
//! Model (named ports)
//!   → Driver          (driver — reset-idle inputs, settle evaluation)
//!   → TraceRecorder   (trace — VCD header bound to the model's port list)
//!   → step loop        (toggle clock → evaluate → record, step-budget bound)
//!   → teardown         (recorder finished exactly once, then model released)
//! ```
//!
//! # Key modules
//!
//! - [`logic`] — scalar signal values (`0` / `1` / `x`)
//! - [`model`] — the named-port [`model::Model`] trait and [`model::SignalStore`]
//! - [`trace`] — VCD trace recorder
//! - [`driver`] — the bounded simulation driver
//! - [`testbench`] — JSON run configuration
//! - [`full_adder`] — bundled self-checking full-adder testbench model
//! - [`error`] — error taxonomy ([`error::HarnessError`], [`error::SimulationFault`])

pub mod logic;

pub mod model;

pub mod error;

pub mod trace;

pub mod driver;

pub mod testbench;

pub mod full_adder;
