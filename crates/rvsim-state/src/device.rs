//! Memory-mapped character output.

use std::io::{self, Write};

/// Data address whose byte stores are routed to the character device.
pub const CHAR_OUT_ADDR: u32 = 0x5000;

/// Character output device.
///
/// Each byte is written and flushed immediately so program output interleaves
/// correctly with anything else the host prints.
#[derive(Debug)]
pub struct CharDevice<W: Write> {
    sink: W,
    written: u64,
}

impl<W: Write> CharDevice<W> {
    pub const fn new(sink: W) -> Self {
        Self { sink, written: 0 }
    }

    /// Emit one byte.
    ///
    /// # Errors
    ///
    /// Propagates write or flush failures of the underlying sink.
    pub fn put(&mut self, byte: u8) -> io::Result<()> {
        self.sink.write_all(&[byte])?;
        self.sink.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Number of bytes emitted so far.
    #[must_use]
    pub const fn written(&self) -> u64 {
        self.written
    }

    pub const fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl CharDevice<io::Stdout> {
    /// Device writing to the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}
