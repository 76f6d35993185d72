//! Architectural state of one hart.

use crate::memory::{DATA_MEMORY_SIZE, Memory, MemoryError};
use crate::registers::RegisterFile;

/// Complete machine state: registers, program counter, and both memories.
///
/// Instruction memory is sized to the program image and never written by
/// execution. Data memory has a fixed capacity with the data image at offset 0.
#[derive(Clone, Debug)]
pub struct CpuState {
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// Program counter (byte address into instruction memory).
    pub pc: u32,
    /// Instructions retired.
    pub instret: u64,
    imem: Memory,
    /// Data memory.
    pub dmem: Memory,
}

impl CpuState {
    /// Build state from a program image and a data image using the default
    /// 4 MiB data memory.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::ImageTooLarge`] if the data image exceeds 4 MiB.
    pub fn new(program: Vec<u8>, data: &[u8]) -> Result<Self, MemoryError> {
        Self::with_data_capacity(program, data, DATA_MEMORY_SIZE)
    }

    /// Like [`CpuState::new`] with an explicit data memory capacity.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::ImageTooLarge`] if the data image exceeds `capacity`.
    pub fn with_data_capacity(
        program: Vec<u8>,
        data: &[u8],
        capacity: usize,
    ) -> Result<Self, MemoryError> {
        Ok(Self {
            regs: RegisterFile::new(),
            pc: 0,
            instret: 0,
            imem: Memory::from_image(program),
            dmem: Memory::with_image(capacity, data)?,
        })
    }

    /// Instruction memory (read-only).
    #[must_use]
    pub const fn imem(&self) -> &Memory {
        &self.imem
    }
}
