//! Command implementations.

mod disasm;
mod run;

use crate::cli::{Cli, Commands};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Run {
            program,
            data,
            format,
            sim,
        } => run::cmd_run(program, data, *format, &sim.to_config()),
        Commands::Disasm { program } => disasm::cmd_disasm(program),
    }
}
