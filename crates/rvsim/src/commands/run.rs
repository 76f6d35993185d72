//! Run command.

use std::path::Path;

use rvsim::{RunReport, SimConfig, Simulator};
use tracing::error;

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, OutputFormat};

/// Handle the `run` command.
pub fn cmd_run(program: &Path, data: &Path, format: OutputFormat, config: &SimConfig) -> i32 {
    let mut sim = match Simulator::load(program, data, config.clone()) {
        Ok(sim) => sim,
        Err(e) => {
            error!(error = %e, "failed to load images");
            return EXIT_FAILURE;
        }
    };

    match sim.run() {
        Ok(report) => {
            print_report(format, &report);
            EXIT_SUCCESS
        }
        Err(e) => {
            let state = sim.hart().state();
            error!(
                error = %e,
                pc = format!("{:#010x}", state.pc),
                instret = state.instret,
                "execution failed"
            );
            EXIT_FAILURE
        }
    }
}

fn print_report(format: OutputFormat, report: &RunReport) {
    match format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Raw => print!("{}", report.to_raw()),
        OutputFormat::Json => println!("{}", report.to_json()),
    }
}
