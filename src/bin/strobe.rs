// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Reference harness binary: drives the bundled full-adder testbench
//! through a bounded clock sequence and writes the waveform trace.
//!
//! Usage:
//!   cargo run -r --bin strobe -- [--steps 1000] [--trace full_adder.vcd]

use std::path::PathBuf;

use clap::Parser;
use strobe::driver::{Driver, ResetSpec, RunConfig};
use strobe::full_adder::FullAdderTb;
use strobe::testbench::TestbenchConfig;

#[derive(Parser, Debug)]
#[command(name = "strobe")]
#[command(about = "Clock-driven harness for the bundled full-adder testbench")]
struct Args {
    /// Testbench configuration JSON. When given, it takes precedence over
    /// the individual flags below (except --trace, which remains the
    /// fallback trace path).
    #[clap(long)]
    config: Option<PathBuf>,

    /// Maximum simulation steps (clock toggles).
    #[clap(long, default_value = "1000")]
    steps: u64,

    /// Output VCD path.
    #[clap(long, default_value = "full_adder.vcd")]
    trace: PathBuf,

    /// Steps to hold reset asserted before releasing it.
    #[clap(long, default_value = "2")]
    reset_cycles: u64,
}

fn main() {
    clilog::init_stderr_color_debug();

    let args = Args::parse();
    clilog::info!("strobe args:\n{:#?}", args);

    let config = match &args.config {
        Some(path) => match TestbenchConfig::from_file(path) {
            Ok(tb) => tb.to_run_config(&args.trace),
            Err(e) => {
                clilog::error!("cannot load testbench config: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            let mut config = RunConfig::new(args.steps, args.trace.clone());
            config.reset = Some(ResetSpec {
                port: "reset_n_i".to_string(),
                active_high: false,
                cycles: args.reset_cycles,
            });
            config
        }
    };

    let mut driver = Driver::new(FullAdderTb::new(), config);
    match driver.run() {
        Ok(summary) => {
            println!();
            println!("=== Simulation Results ===");
            println!("Steps executed: {}", summary.steps_executed);
            println!("Samples written: {}", summary.samples_written);
            println!(
                "Finish reason: {}",
                if summary.finished {
                    "model signaled completion"
                } else {
                    "step budget exhausted"
                }
            );
            println!("Trace: {}", summary.trace_path.display());
        }
        Err(e) => {
            clilog::error!("simulation aborted: {}", e);
            std::process::exit(1);
        }
    }
}
