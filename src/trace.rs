// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! VCD trace recording.
//!
//! [`TraceRecorder`] owns the open waveform file for one run. It binds to a
//! model's port list once, then serializes one time-stamped sample per call.
//! Samples after the first are change-only: a scalar is re-emitted only when
//! its value differs from the last emitted one.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use compact_str::CompactString;
use vcd_ng::{IdCode, SimulationCommand, TimescaleUnit, Writer};

use crate::error::HarnessError;
use crate::logic::Logic;
use crate::model::Model;

/// Shared buffered sink under the VCD writer.
///
/// `vcd_ng::Writer` takes ownership of its `io::Write`, so the recorder
/// keeps a second handle to the buffer. That way `finish` can still flush
/// the file and surface the error after the writer is torn down. `Rc` here
/// also states the contract: a recorder is single-threaded.
#[derive(Clone)]
struct TraceSink(Rc<RefCell<BufWriter<File>>>);

impl Write for TraceSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.borrow_mut().flush()
    }
}

/// Serializes time-stamped signal snapshots of one model to a VCD file.
///
/// Created after the model and finished before the model is released. If a
/// run aborts without reaching [`TraceRecorder::finish`], the buffer's own
/// drop still flushes what was written.
pub struct TraceRecorder {
    writer: Writer<TraceSink>,
    sink: TraceSink,
    path: PathBuf,
    /// Port name and VCD id per wire, in declaration order. Filled by `bind`.
    vars: Vec<(CompactString, IdCode)>,
    /// Last emitted value per wire: 0, 1, 3 = x, 2 = nothing emitted yet.
    last_val: Vec<u8>,
}

impl TraceRecorder {
    /// Open `path` for writing. This is the writability check: it happens
    /// before any model evaluation, and failure aborts the run.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        let sink = TraceSink(Rc::new(RefCell::new(BufWriter::new(file))));
        Ok(TraceRecorder {
            writer: Writer::new(sink.clone()),
            sink,
            path: path.to_owned(),
            vars: Vec::new(),
            last_val: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the VCD header from the model's declared ports: timescale, one
    /// scope named after the model, one scalar wire per port.
    pub fn bind(
        &mut self,
        model: &impl Model,
        timescale: (u32, TimescaleUnit),
    ) -> io::Result<()> {
        self.writer.timescale(timescale.0, timescale.1)?;
        self.writer.add_module(model.name())?;
        for port in model.ports() {
            let id = self.writer.add_wire(1, port.name.as_str())?;
            self.vars.push((port.name.clone(), id));
        }
        self.writer.upscope()?;
        self.writer.enddefinitions()?;
        self.writer.begin(SimulationCommand::Dumpvars)?;
        self.last_val = vec![2u8; self.vars.len()];
        Ok(())
    }

    /// Record one sample tagged with `timestamp`.
    ///
    /// The first sample after `bind` dumps every wire; later samples emit
    /// changed scalars only.
    pub fn sample(&mut self, timestamp: u64, model: &impl Model) -> Result<(), HarnessError> {
        self.writer.timestamp(timestamp)?;
        for (i, (name, id)) in self.vars.iter().enumerate() {
            let value = model.read(name.as_str())?;
            let encoded = match value {
                Logic::Zero => 0u8,
                Logic::One => 1,
                Logic::X => 3,
            };
            if encoded == self.last_val[i] {
                continue;
            }
            self.last_val[i] = encoded;
            self.writer.change_scalar(*id, value.to_vcd())?;
        }
        Ok(())
    }

    /// Tear down the writer and flush the file to durable storage.
    ///
    /// Consuming `self` is what makes the close happen exactly once.
    pub fn finish(self) -> io::Result<()> {
        let TraceRecorder { writer, sink, .. } = self;
        drop(writer);
        let result = sink.0.borrow_mut().flush();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::full_adder::FullAdderTb;
    use std::io::{BufReader, Seek, SeekFrom};
    use vcd_ng::{FastFlow, FastFlowToken, Parser};

    fn recorder_in(dir: &tempfile::TempDir) -> TraceRecorder {
        TraceRecorder::create(&dir.path().join("trace.vcd")).unwrap()
    }

    /// Parse a written trace back: returns (timestamps, value change count).
    fn read_back(path: &Path) -> (Vec<u64>, usize) {
        let file = File::open(path).unwrap();
        let mut bufrd = BufReader::with_capacity(65536, file);
        let mut parser = Parser::new(&mut bufrd);
        let header = parser.parse_header().unwrap();
        assert!(header.timescale.is_some());
        drop(parser);
        let mut file = bufrd.into_inner();
        file.seek(SeekFrom::Start(0)).unwrap();
        let mut flow = FastFlow::new(file, 65536);

        let mut timestamps = Vec::new();
        let mut changes = 0;
        while let Some(tok) = flow.next_token().unwrap() {
            match tok {
                FastFlowToken::Timestamp(t) => timestamps.push(t),
                FastFlowToken::Value(_) => changes += 1,
            }
        }
        (timestamps, changes)
    }

    #[test]
    fn test_header_declares_every_port() {
        let dir = tempfile::tempdir().unwrap();
        let mut rec = recorder_in(&dir);
        let tb = FullAdderTb::new();
        rec.bind(&tb, (1, TimescaleUnit::NS)).unwrap();
        let path = rec.path().to_owned();
        rec.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("$scope module tb_full_adder"));
        assert_eq!(content.matches("$var wire 1").count(), tb.ports().len());
        assert!(content.contains("$enddefinitions"));
    }

    #[test]
    fn test_first_sample_dumps_all_later_samples_changes_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut rec = recorder_in(&dir);
        let mut tb = FullAdderTb::new();
        rec.bind(&tb, (1, TimescaleUnit::NS)).unwrap();

        tb.eval().unwrap();
        rec.sample(0, &tb).unwrap();
        // Nothing changed: the second sample is a bare timestamp.
        rec.sample(1, &tb).unwrap();
        // One input flipped: exactly one scalar change.
        tb.write("clk_i", Logic::One).unwrap();
        tb.eval().unwrap();
        rec.sample(2, &tb).unwrap();

        let path = rec.path().to_owned();
        rec.finish().unwrap();

        let (timestamps, changes) = read_back(&path);
        assert_eq!(timestamps, [0, 1, 2]);
        assert_eq!(changes, tb.ports().len() + 1);
    }

    #[test]
    fn test_create_fails_on_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("trace.vcd");
        assert!(TraceRecorder::create(&path).is_err());
    }
}
