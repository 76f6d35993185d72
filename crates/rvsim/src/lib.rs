//! RVSIM - RV32I instruction-set simulator
//!
//! Executes a raw RV32I instruction image against a data image for a fixed
//! number of cycles, then exposes the final register file.
//!
//! # Example
//!
//! ```ignore
//! use rvsim::{SimConfig, Simulator};
//!
//! let mut sim = Simulator::load("program.bin", "data.bin", SimConfig::default())?;
//! let report = sim.run()?;
//! print!("{}", report.to_text());
//! ```

// Re-export from sub-crates
pub use rvsim_isa::{DecodeError, DecodedInstr, InstrArgs, Op, decode};
pub use rvsim_state::{
    CHAR_OUT_ADDR, CharDevice, CpuState, DATA_MEMORY_SIZE, Memory, MemoryError, Width,
};

mod config;
mod error;
pub mod exec;
mod hart;
mod listing;
mod loader;
mod report;
mod runner;

pub use config::{DEFAULT_CYCLES, DEFAULT_FETCH_MASK, DecodeFaultPolicy, SimConfig};
pub use error::{Result, SimError};
pub use exec::{ExecFault, execute};
pub use hart::{Hart, Step};
pub use listing::disassemble;
pub use loader::{load_data, load_program};
pub use report::TERMINATE_BANNER;
pub use runner::{RunReport, Simulator};
