use std::io;
use std::path::PathBuf;

use rvsim_isa::DecodeError;
use rvsim_state::MemoryError;
use thiserror::Error;

use crate::exec::ExecFault;

/// Simulator errors. Every runtime fault carries the PC it occurred at.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("failed to read {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("memory setup failed: {0}")]
    Memory(#[from] MemoryError),
    #[error("fetch fault at pc {pc:#010x}: {source}")]
    Fetch {
        pc: u32,
        #[source]
        source: MemoryError,
    },
    #[error("decode fault at pc {pc:#010x} (instruction {raw:#010x}): {source}")]
    Decode {
        pc: u32,
        raw: u32,
        #[source]
        source: DecodeError,
    },
    #[error("memory fault at pc {pc:#010x} (instruction {raw:#010x}): {source}")]
    Access {
        pc: u32,
        raw: u32,
        #[source]
        source: MemoryError,
    },
    #[error("character output failed at pc {pc:#010x}: {source}")]
    Output {
        pc: u32,
        #[source]
        source: io::Error,
    },
    #[error("malformed instruction at pc {pc:#010x} (instruction {raw:#010x}): {source}")]
    Malformed {
        pc: u32,
        raw: u32,
        #[source]
        source: ExecFault,
    },
}

impl SimError {
    /// Attach fault context to an execution failure.
    pub(crate) fn from_exec(pc: u32, raw: u32, fault: ExecFault) -> Self {
        match fault {
            ExecFault::Memory(source) => Self::Access { pc, raw, source },
            ExecFault::Output(source) => Self::Output { pc, source },
            fault @ ExecFault::Operands { .. } => Self::Malformed {
                pc,
                raw,
                source: fault,
            },
        }
    }

    /// PC of the faulting cycle, if the error happened during execution.
    #[must_use]
    pub const fn pc(&self) -> Option<u32> {
        match *self {
            Self::Fetch { pc, .. }
            | Self::Decode { pc, .. }
            | Self::Access { pc, .. }
            | Self::Output { pc, .. }
            | Self::Malformed { pc, .. } => Some(pc),
            Self::Load { .. } | Self::Memory(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_exec_keeps_context() {
        let oob = MemoryError::OutOfBounds {
            addr: 0x40_0000,
            width: 4,
            size: 0x40_0000,
        };
        let err = SimError::from_exec(0x24, 0x0000_a283, ExecFault::Memory(oob.clone()));
        assert!(matches!(
            &err,
            SimError::Access { pc: 0x24, raw: 0x0000_a283, source } if *source == oob
        ));
        assert_eq!(err.pc(), Some(0x24));
        assert!(err.to_string().contains("0x00000024"));

        let io = io::Error::other("closed");
        let err = SimError::from_exec(8, 0, ExecFault::Output(io));
        assert!(matches!(err, SimError::Output { pc: 8, .. }));
    }

    #[test]
    fn test_setup_errors_have_no_pc() {
        let err = SimError::from(MemoryError::ImageTooLarge { len: 9, capacity: 8 });
        assert_eq!(err.pc(), None);
    }
}
