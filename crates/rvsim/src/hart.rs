//! Fetch-decode-execute engine for a single hart.

use std::io::Write;

use rvsim_isa::{DecodeError, DecodedInstr, INSTR_SIZE, decode};
use rvsim_state::{CharDevice, CpuState, Width};
use tracing::{trace, warn};

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::exec::execute;

/// Outcome of one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The instruction was executed.
    Executed(DecodedInstr),
    /// The word did not decode and was skipped.
    Skipped(DecodeError),
}

/// One hart with its state, character device, and configuration.
pub struct Hart<W: Write> {
    state: CpuState,
    device: CharDevice<W>,
    config: SimConfig,
    cycles: u64,
    skipped: u64,
}

impl<W: Write> Hart<W> {
    #[must_use]
    pub const fn new(state: CpuState, device: CharDevice<W>, config: SimConfig) -> Self {
        Self {
            state,
            device,
            config,
            cycles: 0,
            skipped: 0,
        }
    }

    /// Fetch the instruction word at the current PC.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Fetch`] if the (masked) PC is outside the program image.
    pub fn fetch(&self) -> Result<u32> {
        let pc = self.state.pc;
        let addr = self.config.fetch_addr(pc);
        self.state
            .imem()
            .load(addr, Width::Word)
            .map_err(|source| SimError::Fetch { pc, source })
    }

    /// Run one fetch-decode-execute cycle.
    ///
    /// # Errors
    ///
    /// Fetch faults, memory faults, and device failures are always fatal.
    /// Decode faults are fatal unless the policy is
    /// [`DecodeFaultPolicy::Skip`](crate::DecodeFaultPolicy::Skip).
    pub fn step(&mut self) -> Result<Step> {
        let pc = self.state.pc;
        let raw = self.fetch()?;
        self.cycles += 1;

        let instr = match decode(raw) {
            Ok(instr) => instr,
            Err(source) if self.config.decode_faults.aborts() => {
                return Err(SimError::Decode { pc, raw, source });
            }
            Err(source) => {
                warn!(
                    pc = format!("{pc:#010x}"),
                    raw = format!("{raw:#010x}"),
                    error = %source,
                    "skipping undecodable word"
                );
                self.state.pc = pc.wrapping_add(INSTR_SIZE);
                self.skipped += 1;
                return Ok(Step::Skipped(source));
            }
        };

        trace!(pc = format!("{pc:#010x}"), raw = format!("{raw:08x}"), "{instr}");

        execute(&mut self.state, &mut self.device, &instr)
            .map_err(|fault| SimError::from_exec(pc, raw, fault))?;
        self.state.regs.clear_zero();
        self.state.instret += 1;
        Ok(Step::Executed(instr))
    }

    /// Run `n` cycles, stopping at the first fatal fault.
    ///
    /// # Errors
    ///
    /// See [`Hart::step`].
    pub fn run_cycles(&mut self, n: u64) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> &CpuState {
        &self.state
    }

    pub const fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    #[must_use]
    pub const fn device(&self) -> &CharDevice<W> {
        &self.device
    }

    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Cycles completed, including skipped words.
    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Words skipped under the skip policy.
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn into_parts(self) -> (CpuState, CharDevice<W>) {
        (self.state, self.device)
    }
}
