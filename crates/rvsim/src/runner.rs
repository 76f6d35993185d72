//! Run driver.

use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use rvsim_state::{CharDevice, CpuState, NUM_REGS};
use tracing::{debug, debug_span, info};

use crate::config::SimConfig;
use crate::error::Result;
use crate::hart::Hart;
use crate::loader::{load_data, load_program};

/// Result of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Cycles executed (equal to the configured budget on success).
    pub cycles: u64,
    /// Instructions retired.
    pub instret: u64,
    /// Undecodable words skipped.
    pub skipped: u64,
    /// Final program counter.
    pub pc: u32,
    /// Final register values, x0 through x31.
    pub registers: [u32; NUM_REGS],
    /// Wall-clock time in seconds.
    pub time_secs: f64,
    /// Speed in MIPS (million instructions per second).
    pub mips: f64,
}

/// Owns one hart for the lifetime of a run.
pub struct Simulator<W: Write> {
    hart: Hart<W>,
}

impl Simulator<io::Stdout> {
    /// Load both images from disk; program output goes to stdout.
    ///
    /// # Errors
    ///
    /// Returns a load fault if either file is unreadable, or a memory fault if
    /// the data image exceeds the configured data memory.
    pub fn load(
        program: impl AsRef<Path>,
        data: impl AsRef<Path>,
        config: SimConfig,
    ) -> Result<Self> {
        let program = load_program(program)?;
        let data = load_data(data, config.data_memory_size)?;
        Self::new(program, &data, config, io::stdout())
    }
}

impl<W: Write> Simulator<W> {
    /// Build a simulator from in-memory images.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Memory`](crate::SimError::Memory) if the data image
    /// exceeds the configured data memory.
    pub fn new(program: Vec<u8>, data: &[u8], config: SimConfig, sink: W) -> Result<Self> {
        let state = CpuState::with_data_capacity(program, data, config.data_memory_size)?;
        debug!(
            imem = state.imem().size(),
            dmem = state.dmem.size(),
            cycles = config.cycles,
            "simulator ready"
        );
        Ok(Self {
            hart: Hart::new(state, CharDevice::new(sink), config),
        })
    }

    /// Execute the configured number of cycles.
    ///
    /// # Errors
    ///
    /// Stops at the first fatal fault; see [`Hart::step`].
    pub fn run(&mut self) -> Result<RunReport> {
        let cycles = self.hart.config().cycles;
        let span = debug_span!("run", cycles);
        let _guard = span.enter();

        let start = Instant::now();
        self.hart.run_cycles(cycles)?;
        let elapsed = start.elapsed();

        let report = self.report(elapsed.as_secs_f64());
        info!(
            cycles = report.cycles,
            instret = report.instret,
            skipped = report.skipped,
            pc = format!("{:#010x}", report.pc),
            time = format!("{:.6}s", report.time_secs),
            mips = format!("{:.2}", report.mips),
            "run complete"
        );
        Ok(report)
    }

    fn report(&self, time_secs: f64) -> RunReport {
        let state = self.hart.state();
        #[allow(clippy::cast_precision_loss)]
        let mips = if time_secs > 0.0 {
            (state.instret as f64 / time_secs) / 1_000_000.0
        } else {
            0.0
        };
        RunReport {
            cycles: self.hart.cycles(),
            instret: state.instret,
            skipped: self.hart.skipped(),
            pc: state.pc,
            registers: state.regs.to_array(),
            time_secs,
            mips,
        }
    }

    #[must_use]
    pub const fn hart(&self) -> &Hart<W> {
        &self.hart
    }

    pub const fn hart_mut(&mut self) -> &mut Hart<W> {
        &mut self.hart
    }

    /// Consume the simulator, returning the final state and the device sink.
    pub fn finish(self) -> (CpuState, W) {
        let (state, device) = self.hart.into_parts();
        (state, device.into_inner())
    }
}
