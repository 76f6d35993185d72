//! Flat little-endian byte memories.
//!
//! Every access is bounds-checked against the allocated capacity. There is
//! no wrapping: an access that does not fit is a [`MemoryError::OutOfBounds`].

use thiserror::Error;

/// Data memory capacity (4 MiB).
pub const DATA_MEMORY_SIZE: usize = 4 << 20;

/// Memory access error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("{width}-byte access at {addr:#010x} is outside {size}-byte memory")]
    OutOfBounds { addr: u32, width: usize, size: usize },

    #[error("image of {len} bytes does not fit in {capacity}-byte memory")]
    ImageTooLarge { len: usize, capacity: usize },
}

/// Access width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Width {
    Byte,
    Half,
    Word,
}

impl Width {
    /// Width in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }
}

/// Owned byte buffer addressed by byte offset.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    /// Zero-filled memory of `size` bytes.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size].into_boxed_slice(),
        }
    }

    /// Memory holding exactly `image`.
    #[must_use]
    pub fn from_image(image: Vec<u8>) -> Self {
        Self {
            bytes: image.into_boxed_slice(),
        }
    }

    /// Zero-filled memory of `capacity` bytes with `image` copied to offset 0.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::ImageTooLarge`] if the image exceeds the capacity.
    pub fn with_image(capacity: usize, image: &[u8]) -> Result<Self, MemoryError> {
        if image.len() > capacity {
            return Err(MemoryError::ImageTooLarge {
                len: image.len(),
                capacity,
            });
        }
        let mut memory = Self::new(capacity);
        memory.bytes[..image.len()].copy_from_slice(image);
        Ok(memory)
    }

    /// Capacity in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn slice(&self, addr: u32, width: Width) -> Result<&[u8], MemoryError> {
        let start = addr as usize;
        start
            .checked_add(width.bytes())
            .and_then(|end| self.bytes.get(start..end))
            .ok_or_else(|| self.out_of_bounds(addr, width))
    }

    fn slice_mut(&mut self, addr: u32, width: Width) -> Result<&mut [u8], MemoryError> {
        let size = self.size();
        let start = addr as usize;
        start
            .checked_add(width.bytes())
            .and_then(|end| self.bytes.get_mut(start..end))
            .ok_or(MemoryError::OutOfBounds {
                addr,
                width: width.bytes(),
                size,
            })
    }

    const fn out_of_bounds(&self, addr: u32, width: Width) -> MemoryError {
        MemoryError::OutOfBounds {
            addr,
            width: width.bytes(),
            size: self.bytes.len(),
        }
    }

    /// Load `width` bytes at `addr`, zero-extended to 32 bits.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if the access does not fit.
    pub fn load(&self, addr: u32, width: Width) -> Result<u32, MemoryError> {
        let bytes = self.slice(addr, width)?;
        Ok(match width {
            Width::Byte => u32::from(bytes[0]),
            Width::Half => u32::from(u16::from_le_bytes([bytes[0], bytes[1]])),
            Width::Word => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        })
    }

    /// Load `width` bytes at `addr`, sign-extended to 32 bits.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if the access does not fit.
    pub fn load_signed(&self, addr: u32, width: Width) -> Result<u32, MemoryError> {
        let value = self.load(addr, width)?;
        Ok(match width {
            Width::Byte => value as u8 as i8 as i32 as u32,
            Width::Half => value as u16 as i16 as i32 as u32,
            Width::Word => value,
        })
    }

    /// Store the low `width` bytes of `value` at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if the access does not fit.
    pub fn store(&mut self, addr: u32, width: Width, value: u32) -> Result<(), MemoryError> {
        let bytes = self.slice_mut(addr, width)?;
        bytes.copy_from_slice(&value.to_le_bytes()[..width.bytes()]);
        Ok(())
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory").field("size", &self.size()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_round_trip() {
        let mut mem = Memory::new(64);
        for (addr, value) in [(0, 0xDEAD_BEEF), (4, 0), (13, u32::MAX), (60, 0x8000_0001)] {
            mem.store(addr, Width::Word, value).unwrap();
            assert_eq!(mem.load(addr, Width::Word).unwrap(), value);
        }
    }

    #[test]
    fn test_little_endian_layout() {
        let mut mem = Memory::new(8);
        mem.store(0, Width::Word, 0x1122_3344).unwrap();
        assert_eq!(&mem.as_bytes()[..4], &[0x44, 0x33, 0x22, 0x11]);
        assert_eq!(mem.load(0, Width::Half).unwrap(), 0x3344);
        assert_eq!(mem.load(2, Width::Byte).unwrap(), 0x22);
    }

    #[test]
    fn test_sign_extension() {
        let mut mem = Memory::new(8);
        mem.store(0, Width::Byte, 0x80).unwrap();
        assert_eq!(mem.load_signed(0, Width::Byte).unwrap(), 0xFFFF_FF80);
        assert_eq!(mem.load(0, Width::Byte).unwrap(), 0x0000_0080);

        mem.store(2, Width::Half, 0x8001).unwrap();
        assert_eq!(mem.load_signed(2, Width::Half).unwrap(), 0xFFFF_8001);
        assert_eq!(mem.load(2, Width::Half).unwrap(), 0x0000_8001);

        mem.store(4, Width::Half, 0x7FFF).unwrap();
        assert_eq!(mem.load_signed(4, Width::Half).unwrap(), 0x7FFF);
    }

    #[test]
    fn test_store_keeps_neighbours() {
        let mut mem = Memory::new(8);
        mem.store(0, Width::Word, 0xFFFF_FFFF).unwrap();
        mem.store(1, Width::Byte, 0x1234_5600).unwrap();
        assert_eq!(mem.load(0, Width::Word).unwrap(), 0xFFFF_00FF);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut mem = Memory::new(16);
        assert!(mem.load(12, Width::Word).is_ok());
        assert_eq!(
            mem.load(13, Width::Word),
            Err(MemoryError::OutOfBounds {
                addr: 13,
                width: 4,
                size: 16
            })
        );
        assert!(mem.store(16, Width::Byte, 0).is_err());
        assert!(mem.load(u32::MAX, Width::Half).is_err());
    }

    #[test]
    fn test_with_image() {
        let mem = Memory::with_image(8, &[1, 2, 3]).unwrap();
        assert_eq!(mem.size(), 8);
        assert_eq!(mem.as_bytes(), &[1, 2, 3, 0, 0, 0, 0, 0]);

        assert_eq!(
            Memory::with_image(2, &[1, 2, 3]),
            Err(MemoryError::ImageTooLarge {
                len: 3,
                capacity: 2
            })
        );
    }

    #[test]
    fn test_from_image_size() {
        let mem = Memory::from_image(vec![0x13, 0, 0, 0]);
        assert_eq!(mem.size(), 4);
        assert_eq!(mem.load(0, Width::Word).unwrap(), 0x13);
    }
}
