//! Disassemble command.

use std::path::Path;

use rvsim::{disassemble, load_program};
use tracing::error;

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};

/// Handle the `disasm` command.
pub fn cmd_disasm(program: &Path) -> i32 {
    match load_program(program) {
        Ok(image) => {
            for line in disassemble(&image) {
                println!("{line}");
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            error!(error = %e, "failed to load program");
            EXIT_FAILURE
        }
    }
}
