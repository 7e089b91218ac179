// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Self-checking full-adder testbench model.
//!
//! Bundled reference model for the harness: a combinational full adder plus
//! the surrounding testbench logic. On every rising clock edge after reset
//! release, the testbench checks the settled outputs of the previously
//! applied input vector against an independently computed arithmetic
//! expectation, then applies the next of the 8 input combinations. A
//! mismatch is a [`SimulationFault`]; completion is signaled once the whole
//! sweep has been checked.

use crate::error::{HarnessError, SimulationFault};
use crate::logic::Logic;
use crate::model::{Model, Port, PortDir, SignalStore};

/// The 8 input combinations (a, b, cin), swept in ascending order.
const VECTORS: [(u8, u8, u8); 8] = [
    (0, 0, 0),
    (0, 0, 1),
    (0, 1, 0),
    (0, 1, 1),
    (1, 0, 0),
    (1, 0, 1),
    (1, 1, 0),
    (1, 1, 1),
];

/// Testbench around a combinational full adder.
///
/// Ports: `clk_i` and `reset_n_i` (active low) are driven externally;
/// `a_i`/`b_i`/`cin_i` are driven by the testbench's own vector sweep;
/// `sum_o`/`cout_o` are the adder outputs.
pub struct FullAdderTb {
    signals: SignalStore,
    last_clk: Logic,
    /// Vector currently applied to the adder inputs, if any.
    applied: Option<usize>,
    /// Vectors checked so far; the sweep applies them in order.
    checked: usize,
    /// Rising edges observed, for fault messages.
    cycles: u64,
    done: bool,
}

impl FullAdderTb {
    pub fn new() -> Self {
        let mut signals = SignalStore::new("tb_full_adder");
        signals.declare("clk_i", PortDir::Input);
        signals.declare("reset_n_i", PortDir::Input);
        signals.declare("a_i", PortDir::Input);
        signals.declare("b_i", PortDir::Input);
        signals.declare("cin_i", PortDir::Input);
        signals.declare("sum_o", PortDir::Output);
        signals.declare("cout_o", PortDir::Output);
        for port in ["clk_i", "reset_n_i", "a_i", "b_i", "cin_i"] {
            signals.set(port, Logic::Zero);
        }
        FullAdderTb {
            signals,
            last_clk: Logic::Zero,
            applied: None,
            checked: 0,
            cycles: 0,
            done: false,
        }
    }

    fn in_reset(&self) -> bool {
        // Active-low reset; an undriven (x) level counts as asserted.
        !self
            .signals
            .get("reset_n_i")
            .unwrap_or(Logic::X)
            .is_one()
    }

    fn bit(&self, name: &str) -> u8 {
        self.signals.get(name).map_or(0, |v| v.is_one() as u8)
    }

    fn apply(&mut self, idx: usize) {
        let (a, b, cin) = VECTORS[idx];
        self.signals.set("a_i", Logic::from(a != 0));
        self.signals.set("b_i", Logic::from(b != 0));
        self.signals.set("cin_i", Logic::from(cin != 0));
        self.applied = Some(idx);
    }

    /// Compare the settled outputs for vector `idx` against `a + b + cin`,
    /// computed independently of the adder's gate expressions.
    fn check(&self, idx: usize) -> Result<(), SimulationFault> {
        let (a, b, cin) = VECTORS[idx];
        let expected = a + b + cin;
        let (exp_sum, exp_cout) = (expected & 1, expected >> 1);
        let (sum, cout) = (self.bit("sum_o"), self.bit("cout_o"));
        if sum != exp_sum || cout != exp_cout {
            return Err(SimulationFault::new(format!(
                "cycle {}: a={} b={} cin={}: got sum={} cout={}, expected sum={} cout={}",
                self.cycles, a, b, cin, sum, cout, exp_sum, exp_cout
            )));
        }
        Ok(())
    }
}

impl Default for FullAdderTb {
    fn default() -> Self {
        FullAdderTb::new()
    }
}

impl Model for FullAdderTb {
    fn name(&self) -> &str {
        "tb_full_adder"
    }

    fn ports(&self) -> &[Port] {
        self.signals.ports()
    }

    fn read(&self, port: &str) -> Result<Logic, HarnessError> {
        self.signals.read(port)
    }

    fn write(&mut self, port: &str, value: Logic) -> Result<(), HarnessError> {
        self.signals.write_input(port, value)
    }

    fn eval(&mut self) -> Result<(), SimulationFault> {
        let clk = self.signals.get("clk_i").unwrap_or(Logic::X);
        let rising = clk.is_one() && !self.last_clk.is_one();
        self.last_clk = clk;

        if rising {
            self.cycles += 1;
            if self.in_reset() {
                // The sweep restarts from the first vector once reset
                // releases.
                self.applied = None;
                self.checked = 0;
            } else {
                if let Some(idx) = self.applied {
                    // Outputs settled during the previous evaluations.
                    self.check(idx)?;
                    self.checked = idx + 1;
                }
                if self.checked >= VECTORS.len() {
                    self.done = true;
                } else {
                    self.apply(self.checked);
                }
            }
        }

        // Combinational adder, evaluated on every call.
        let (a, b, cin) = (self.bit("a_i"), self.bit("b_i"), self.bit("cin_i"));
        let sum = a ^ b ^ cin;
        let cout = (a & b) | ((a ^ b) & cin);
        self.signals.set("sum_o", Logic::from(sum != 0));
        self.signals.set("cout_o", Logic::from(cout != 0));
        Ok(())
    }

    fn finished(&self) -> bool {
        self.done
    }
}
