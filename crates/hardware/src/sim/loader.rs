//! Program Image Loader.
//!
//! This module provides utilities for getting a program image into memory. It performs:
//! 1. **Binary loading:** Reads a raw image from disk into a byte buffer, in full, before
//!    any instruction executes.
//! 2. **Placement:** Copies the image verbatim to the load address after checking it fits.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::error::LoadError;
use crate::soc::Memory;

/// Loads a binary file from disk into a byte vector.
///
/// # Arguments
///
/// * `path` - Path to the binary file.
///
/// # Returns
///
/// The raw bytes of the file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Copies `image` into `mem` starting at `load_address`.
///
/// Nothing is written unless the whole image fits.
///
/// # Arguments
///
/// * `mem` - Destination memory.
/// * `image` - Raw program bytes.
/// * `load_address` - Address of the first byte.
///
/// # Errors
///
/// Returns [`LoadError::ProgramTooLarge`] if `load_address + image.len()` exceeds capacity.
pub fn load_image(mem: &mut Memory, image: &[u8], load_address: u32) -> Result<(), LoadError> {
    let capacity = mem.capacity();
    let too_large = || LoadError::ProgramTooLarge {
        len: image.len(),
        load_address,
        capacity,
    };
    let end = (load_address as usize)
        .checked_add(image.len())
        .ok_or_else(too_large)?;
    if end > capacity {
        return Err(too_large());
    }
    mem.write_bytes(load_address, image)
        .map_err(|_| too_large())?;
    debug!(
        "loaded {} bytes at {load_address:#010x}..{end:#010x}",
        image.len()
    );
    Ok(())
}
