//! Simulation configuration.

use rvsim_state::DATA_MEMORY_SIZE;

/// Default cycle budget.
pub const DEFAULT_CYCLES: u64 = 1_000_000;

/// Default fetch mask: fetch addresses are confined to a 1 MiB window.
pub const DEFAULT_FETCH_MASK: u32 = 0xF_FFFF;

/// What to do with a word that does not decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodeFaultPolicy {
    /// Stop the run with an error.
    #[default]
    Abort,
    /// Log a warning, advance PC by 4, and keep going.
    Skip,
}

impl DecodeFaultPolicy {
    pub const fn aborts(self) -> bool {
        matches!(self, Self::Abort)
    }
}

/// Simulator configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Number of decode-execute cycles to run.
    pub cycles: u64,
    /// Mask applied to PC before fetching (`None` = unmasked).
    pub fetch_mask: Option<u32>,
    /// Handling of undecodable words.
    pub decode_faults: DecodeFaultPolicy,
    /// Data memory capacity in bytes.
    pub data_memory_size: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            fetch_mask: Some(DEFAULT_FETCH_MASK),
            decode_faults: DecodeFaultPolicy::Abort,
            data_memory_size: DATA_MEMORY_SIZE,
        }
    }
}

impl SimConfig {
    /// Set the cycle budget.
    #[must_use]
    pub const fn with_cycles(mut self, cycles: u64) -> Self {
        self.cycles = cycles;
        self
    }

    /// Set the fetch mask.
    #[must_use]
    pub const fn with_fetch_mask(mut self, mask: Option<u32>) -> Self {
        self.fetch_mask = mask;
        self
    }

    /// Set the decode fault policy.
    #[must_use]
    pub const fn with_decode_faults(mut self, policy: DecodeFaultPolicy) -> Self {
        self.decode_faults = policy;
        self
    }

    /// Set the data memory capacity.
    #[must_use]
    pub const fn with_data_memory_size(mut self, size: usize) -> Self {
        self.data_memory_size = size;
        self
    }

    /// Address actually fetched for `pc`.
    #[inline]
    #[must_use]
    pub const fn fetch_addr(&self, pc: u32) -> u32 {
        match self.fetch_mask {
            Some(mask) => pc & mask,
            None => pc,
        }
    }
}
