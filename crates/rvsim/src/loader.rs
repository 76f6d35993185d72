//! Image loading.

use std::fs;
use std::path::Path;

use rvsim_isa::INSTR_SIZE;
use rvsim_state::MemoryError;
use tracing::{info, warn};

use crate::error::{Result, SimError};

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| SimError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Read an instruction image. The bytes become instruction memory verbatim.
///
/// # Errors
///
/// Returns [`SimError::Load`] if the file cannot be read.
pub fn load_program(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let image = read(path)?;
    info!(path = %path.display(), size = image.len(), "loaded instruction image");
    if image.len() % INSTR_SIZE as usize != 0 {
        warn!(
            size = image.len(),
            "instruction image is not a whole number of words; trailing bytes are unreachable"
        );
    }
    Ok(image)
}

/// Read a data image destined for a data memory of `capacity` bytes.
///
/// # Errors
///
/// Returns [`SimError::Load`] if the file cannot be read, or
/// [`SimError::Memory`] if the image does not fit.
pub fn load_data(path: impl AsRef<Path>, capacity: usize) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let image = read(path)?;
    info!(path = %path.display(), size = image.len(), "loaded data image");
    if image.len() > capacity {
        return Err(MemoryError::ImageTooLarge {
            len: image.len(),
            capacity,
        }
        .into());
    }
    Ok(image)
}
