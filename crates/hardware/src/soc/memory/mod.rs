//! Physical System Memory.
//!
//! This module implements the flat, byte-addressed main memory. It provides:
//! 1. **Storage:** A zero-filled byte array of fixed capacity.
//! 2. **Bus Access:** Generic little-endian `load`/`store` of bytes and words.
//! 3. **Bounds Checking:** Every access must satisfy `addr + width <= capacity`;
//!    anything else is an [`Fault::OutOfBoundsAccess`], never clamped or wrapped.

use std::fmt;
use std::ops::Range;

use crate::common::{AccessType, Fault};
use crate::soc::traits::MemValue;

/// Main memory.
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    /// Creates a zero-filled memory of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0u8; size].into_boxed_slice(),
        }
    }

    /// Capacity in bytes.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Validates an access and returns the byte range it covers.
    #[inline(always)]
    fn span(&self, addr: u32, width: usize, access: AccessType) -> Result<Range<usize>, Fault> {
        let start = addr as usize;
        match start.checked_add(width) {
            Some(end) if end <= self.bytes.len() => Ok(start..end),
            _ => Err(Fault::OutOfBoundsAccess {
                addr,
                width,
                access,
            }),
        }
    }

    /// Loads a value from `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::OutOfBoundsAccess`] if `addr + T::WIDTH` exceeds capacity.
    #[inline]
    pub fn load<T: MemValue>(&self, addr: u32) -> Result<T, Fault> {
        let span = self.span(addr, T::WIDTH, AccessType::Read)?;
        Ok(T::from_le_slice(&self.bytes[span]))
    }

    /// Stores `val` at `addr`, overwriting unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::OutOfBoundsAccess`] if `addr + T::WIDTH` exceeds capacity;
    /// memory is left untouched in that case.
    #[inline]
    pub fn store<T: MemValue>(&mut self, addr: u32, val: T) -> Result<(), Fault> {
        let span = self.span(addr, T::WIDTH, AccessType::Write)?;
        val.write_le(&mut self.bytes[span]);
        Ok(())
    }

    /// Fetches the instruction word at `addr`.
    ///
    /// Identical to a word load except that faults report [`AccessType::Fetch`].
    #[inline]
    pub fn fetch(&self, addr: u32) -> Result<u32, Fault> {
        let span = self.span(addr, u32::WIDTH, AccessType::Fetch)?;
        Ok(u32::from_le_slice(&self.bytes[span]))
    }

    /// Borrows `len` bytes starting at `addr`.
    pub fn read_slice(&self, addr: u32, len: usize) -> Result<&[u8], Fault> {
        let span = self.span(addr, len, AccessType::Read)?;
        Ok(&self.bytes[span])
    }

    /// Copies `data` into memory starting at `addr`.
    pub fn write_bytes(&mut self, addr: u32, data: &[u8]) -> Result<(), Fault> {
        let span = self.span(addr, data.len(), AccessType::Write)?;
        self.bytes[span].copy_from_slice(data);
        Ok(())
    }

    /// The whole memory as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("capacity", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
