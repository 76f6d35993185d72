//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rvsim::{DATA_MEMORY_SIZE, DEFAULT_CYCLES, DEFAULT_FETCH_MASK, DecodeFaultPolicy, SimConfig};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "rvsim")]
#[command(about = "RV32I instruction-set simulator")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    /// Log every executed instruction
    #[arg(long, global = true, conflicts_with = "silent")]
    pub trace: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log directive for the chosen verbosity.
    pub const fn log_directive(&self) -> &'static str {
        if self.trace {
            "rvsim=trace"
        } else if self.verbose {
            "rvsim=debug"
        } else if self.silent {
            "rvsim=error"
        } else {
            "rvsim=info"
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an instruction image against a data image
    Run {
        /// Raw instruction image
        #[arg(value_name = "PROGRAM")]
        program: PathBuf,

        /// Raw data image
        #[arg(value_name = "DATA")]
        data: PathBuf,

        /// Output format for the final register dump
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        #[command(flatten)]
        sim: SimArgs,
    },
    /// Disassemble an instruction image
    Disasm {
        /// Raw instruction image
        #[arg(value_name = "PROGRAM")]
        program: PathBuf,
    },
}

/// Simulation options shared by commands that execute code.
#[derive(clap::Args, Clone, Debug)]
pub struct SimArgs {
    /// Number of decode-execute cycles
    #[arg(long, default_value_t = DEFAULT_CYCLES)]
    pub cycles: u64,

    /// Mask applied to PC before fetch, in hex [default: 0xFFFFF]
    #[arg(long, value_name = "HEX", value_parser = parse_hex)]
    pub fetch_mask: Option<u32>,

    /// Fetch from the unmasked PC
    #[arg(long, conflicts_with = "fetch_mask")]
    pub no_fetch_mask: bool,

    /// Handling of undecodable instruction words
    #[arg(long, value_enum, default_value = "abort")]
    pub on_decode_fault: DecodeFaultArg,

    /// Data memory size in bytes
    #[arg(long, default_value_t = DATA_MEMORY_SIZE)]
    pub data_memory_size: usize,
}

impl SimArgs {
    pub fn to_config(&self) -> SimConfig {
        SimConfig::default()
            .with_cycles(self.cycles)
            .with_fetch_mask(if self.no_fetch_mask {
                None
            } else {
                Some(self.fetch_mask.unwrap_or(DEFAULT_FETCH_MASK))
            })
            .with_decode_faults(self.on_decode_fault.into())
            .with_data_memory_size(self.data_memory_size)
    }
}

/// Output format for run command.
#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Text,
    /// Raw key-value output (for scripting)
    Raw,
    /// JSON output
    Json,
}

/// Decode fault policy argument.
#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum DecodeFaultArg {
    /// Stop the run
    #[default]
    Abort,
    /// Warn and continue at PC + 4
    Skip,
}

impl From<DecodeFaultArg> for DecodeFaultPolicy {
    fn from(arg: DecodeFaultArg) -> Self {
        match arg {
            DecodeFaultArg::Abort => Self::Abort,
            DecodeFaultArg::Skip => Self::Skip,
        }
    }
}

/// Parse a hex value with optional `0x` prefix.
pub fn parse_hex(s: &str) -> Result<u32, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(&digits.replace('_', ""), 16)
        .map_err(|e| format!("invalid hex value '{s}': {e}"))
}
