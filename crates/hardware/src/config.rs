//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! machine. It provides:
//! 1. **Defaults:** Reference memory sizing and load address.
//! 2. **Structures:** Hierarchical config for general run options and the system memory map.
//! 3. **Validation:** `Config::from_json` rejects documents describing an impossible machine.
//!
//! Configuration is supplied as JSON (`--config` on the CLI), or use `Config::default()`.

use serde::Deserialize;

use crate::common::constants::MAX_MEMORY_SIZE;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Total size of main memory (64K words, 256 KiB).
    ///
    /// Accesses with `addr + width` beyond this raise an out-of-bounds fault.
    pub const MEMORY_SIZE: usize = constants::MEMORY_SIZE;

    /// Address where program images are copied and execution begins.
    pub const LOAD_ADDRESS: u32 = constants::LOAD_ADDRESS;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use w32sim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.general.trace_instructions, false);
/// assert_eq!(config.system.load_address, 0x3000);
/// ```
///
/// Deserializing from JSON; omitted fields keep their defaults:
///
/// ```
/// use w32sim_core::config::Config;
///
/// let json = r#"{
///     "general": {
///         "max_cycles": 1000,
///         "initial_sp": 65536
///     },
///     "system": {
///         "memory_size": 131072
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_cycles, Some(1000));
/// assert_eq!(config.general.initial_sp, Some(0x1_0000));
/// assert_eq!(config.system.memory_size, 0x2_0000);
/// assert_eq!(config.system.load_address, 0x3000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory sizing and program placement
    #[serde(default)]
    pub system: SystemConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed documents, and the other
    /// variants for well-formed documents that fail [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a machine that can be built.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::InvalidMemorySize`] if memory is empty or larger than 4 GiB.
    /// * [`ConfigError::LoadAddressOutOfRange`] if the load address lies outside memory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.system.memory_size;
        if size == 0 || size as u64 > MAX_MEMORY_SIZE {
            return Err(ConfigError::InvalidMemorySize(size));
        }
        if self.system.load_address as usize >= size {
            return Err(ConfigError::LoadAddressOutOfRange {
                load_address: self.system.load_address,
                memory_size: size,
            });
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Log every executed instruction at `debug` level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Stop a run after this many fetch cycles. `None` runs until HALT.
    #[serde(default)]
    pub max_cycles: Option<u64>,

    /// Initial stack pointer. Defaults to 0, so the first push wraps to the top of
    /// the 32-bit space and faults unless a program sets `sp` itself.
    #[serde(default)]
    pub initial_sp: Option<u32>,
}

/// Memory sizing and program placement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemConfig {
    /// Main memory size in bytes
    #[serde(default = "SystemConfig::default_memory_size")]
    pub memory_size: usize,

    /// Program image load address and initial PC
    #[serde(default = "SystemConfig::default_load_address")]
    pub load_address: u32,
}

impl SystemConfig {
    /// Returns the default memory size in bytes.
    const fn default_memory_size() -> usize {
        defaults::MEMORY_SIZE
    }

    /// Returns the default load address.
    const fn default_load_address() -> u32 {
        defaults::LOAD_ADDRESS
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            memory_size: defaults::MEMORY_SIZE,
            load_address: defaults::LOAD_ADDRESS,
        }
    }
}
