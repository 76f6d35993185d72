//! General-purpose register file.

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 32;

/// The 32 integer registers. `x0` reads as zero and ignores writes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; NUM_REGS],
}

impl RegisterFile {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Read register `index` (masked to 0..=31).
    #[inline]
    #[must_use]
    pub const fn read(&self, index: u8) -> u32 {
        self.regs[(index & 0x1F) as usize]
    }

    /// Write register `index` (masked to 0..=31). Writes to `x0` are discarded.
    #[inline]
    pub const fn write(&mut self, index: u8, value: u32) {
        let index = (index & 0x1F) as usize;
        if index != 0 {
            self.regs[index] = value;
        }
    }

    /// Force `x0` back to zero.
    #[inline]
    pub const fn clear_zero(&mut self) {
        self.regs[0] = 0;
    }

    /// Snapshot of all registers, index-ordered.
    #[must_use]
    pub const fn to_array(&self) -> [u32; NUM_REGS] {
        self.regs
    }

    /// `(index, value)` pairs in register order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.regs.iter().copied().enumerate()
    }
}

impl From<[u32; NUM_REGS]> for RegisterFile {
    fn from(mut regs: [u32; NUM_REGS]) -> Self {
        regs[0] = 0;
        Self { regs }
    }
}
