//! Bus value trait.
//!
//! This module defines the `MemValue` trait implemented by every value width the
//! memory bus can move. It provides:
//! 1. **Width:** The number of bytes a value occupies in memory.
//! 2. **Encoding:** Little-endian conversion to and from memory bytes.
//!
//! The trait is sealed: the bus moves bytes and words only.

mod sealed {
    pub trait Sealed {}
}

/// A value that can be loaded from or stored to memory.
pub trait MemValue: Copy + sealed::Sealed {
    /// Size of the value in bytes.
    const WIDTH: usize;

    /// Reassembles a value from exactly `WIDTH` little-endian bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Writes the value as exactly `WIDTH` little-endian bytes.
    fn write_le(self, out: &mut [u8]);
}

macro_rules! impl_mem_value {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl MemValue for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                #[inline(always)]
                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.copy_from_slice(bytes);
                    <$t>::from_le_bytes(buf)
                }

                #[inline(always)]
                fn write_le(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_mem_value!(u8, u32);
