// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Named-port model interface.
//!
//! A model owns all simulated signal state for one design under test and
//! exposes it through named single-bit ports. The driver and the trace
//! recorder only ever touch a model through this interface; a model's
//! internal state layout is its own business.

use compact_str::CompactString;
use indexmap::IndexMap;

use crate::error::{HarnessError, SimulationFault};
use crate::logic::Logic;

/// Port direction as seen from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDir {
    Input,
    Output,
}

/// A declared port: name plus direction. Declaration order is the VCD wire
/// order.
#[derive(Debug, Clone)]
pub struct Port {
    pub name: CompactString,
    pub dir: PortDir,
}

/// An executable representation of a design's simulated state and
/// evaluation logic.
pub trait Model {
    /// Short instance name; used as the trace scope.
    fn name(&self) -> &str;

    /// Declared ports, in declaration order.
    fn ports(&self) -> &[Port];

    /// Current value of a port.
    fn read(&self, port: &str) -> Result<Logic, HarnessError>;

    /// Drive an input port. Writing an output or an undeclared name is an
    /// error.
    fn write(&mut self, port: &str, value: Logic) -> Result<(), HarnessError>;

    /// Propagate the current input state through the simulated logic.
    ///
    /// Evaluation never self-toggles the clock input; only external code
    /// drives it.
    fn eval(&mut self) -> Result<(), SimulationFault>;

    /// Model-signaled completion. Once true, the driver stops stepping.
    fn finished(&self) -> bool;
}

/// Insertion-ordered port/value table for [`Model`] implementors.
///
/// Keeps the declared ports and their current values together so that the
/// trait's `ports`/`read`/`write` methods can be forwarded directly. Every
/// port starts at `x` until something drives it.
pub struct SignalStore {
    model: CompactString,
    ports: Vec<Port>,
    values: IndexMap<CompactString, Logic>,
}

impl SignalStore {
    pub fn new(model: &str) -> Self {
        SignalStore {
            model: CompactString::new(model),
            ports: Vec::new(),
            values: IndexMap::new(),
        }
    }

    /// Declare a port. Initial value is `x`.
    pub fn declare(&mut self, name: &str, dir: PortDir) {
        let name = CompactString::new(name);
        self.ports.push(Port {
            name: name.clone(),
            dir,
        });
        self.values.insert(name, Logic::X);
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Current value, `None` for undeclared names.
    pub fn get(&self, name: &str) -> Option<Logic> {
        self.values.get(name).copied()
    }

    /// Internal update, without the input-direction check. The model itself
    /// uses this to settle its outputs. Returns false for undeclared names.
    pub fn set(&mut self, name: &str, value: Logic) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn read(&self, name: &str) -> Result<Logic, HarnessError> {
        self.get(name).ok_or_else(|| HarnessError::UnknownPort {
            model: self.model.to_string(),
            port: name.to_string(),
        })
    }

    /// Checked external write: the port must exist and be an input.
    pub fn write_input(&mut self, name: &str, value: Logic) -> Result<(), HarnessError> {
        let port = self
            .ports
            .iter()
            .find(|p| p.name.as_str() == name)
            .ok_or_else(|| HarnessError::UnknownPort {
                model: self.model.to_string(),
                port: name.to_string(),
            })?;
        if port.dir != PortDir::Input {
            return Err(HarnessError::NotAnInput {
                port: name.to_string(),
            });
        }
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SignalStore {
        let mut s = SignalStore::new("dut");
        s.declare("clk_i", PortDir::Input);
        s.declare("q_o", PortDir::Output);
        s
    }

    #[test]
    fn test_ports_keep_declaration_order() {
        let s = store();
        let names: Vec<_> = s.ports().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["clk_i", "q_o"]);
    }

    #[test]
    fn test_undriven_port_reads_x() {
        let s = store();
        assert_eq!(s.read("clk_i").unwrap(), Logic::X);
    }

    #[test]
    fn test_write_input_rejects_outputs() {
        let mut s = store();
        assert!(matches!(
            s.write_input("q_o", Logic::One),
            Err(HarnessError::NotAnInput { .. })
        ));
    }

    #[test]
    fn test_unknown_port_is_an_error() {
        let mut s = store();
        assert!(matches!(
            s.read("nope"),
            Err(HarnessError::UnknownPort { .. })
        ));
        assert!(matches!(
            s.write_input("nope", Logic::One),
            Err(HarnessError::UnknownPort { .. })
        ));
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let mut s = store();
        assert!(s.set("q_o", Logic::One));
        assert_eq!(s.get("q_o"), Some(Logic::One));
        assert!(!s.set("nope", Logic::One));
    }
}
