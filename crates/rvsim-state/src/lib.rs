//! RV32I machine state.
//!
//! This crate provides the [`CpuState`] owned by a simulated hart: the
//! register file, instruction and data memories with checked little-endian
//! accessors, and the memory-mapped character output device.
//!
//! ```
//! use rvsim_state::{CpuState, Width};
//!
//! let mut state = CpuState::new(vec![0x13, 0, 0, 0], &[]).unwrap();
//! state.dmem.store(0x100, Width::Word, 0xDEAD_BEEF).unwrap();
//! assert_eq!(state.dmem.load(0x100, Width::Word).unwrap(), 0xDEAD_BEEF);
//! ```

mod device;
mod memory;
mod registers;
mod state;

pub use device::{CHAR_OUT_ADDR, CharDevice};
pub use memory::{DATA_MEMORY_SIZE, Memory, MemoryError, Width};
pub use registers::{NUM_REGS, RegisterFile};
pub use state::CpuState;
