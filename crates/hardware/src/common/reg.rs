//! Register File.
//!
//! This module provides the `Reg` enumeration and the `RegisterFile` that stores
//! the sixteen architectural registers. It provides:
//! 1. **Indexed Storage:** A fixed array of 32-bit registers addressed by `Reg`.
//! 2. **Named Accessors:** `pc()`, `sp()`, `flags()` and friends over the same storage.
//! 3. **Snapshots:** Immutable copies handed to observers before and after each step.

use std::fmt;

use serde::Serialize;

use crate::core::arch::flags::Flags;
use crate::isa::abi;

/// Number of architectural registers.
pub const REG_COUNT: usize = 16;

/// Architectural register names, in register-file order.
///
/// The discriminant is the 4-bit index used by instruction operand fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Reg {
    /// General-purpose register 0.
    R0 = 0,
    /// General-purpose register 1 (trap argument).
    R1,
    /// General-purpose register 2.
    R2,
    /// General-purpose register 3.
    R3,
    /// General-purpose register 4.
    R4,
    /// General-purpose register 5.
    R5,
    /// General-purpose register 6.
    R6,
    /// General-purpose register 7.
    R7,
    /// General-purpose register 8.
    R8,
    /// General-purpose register 9.
    R9,
    /// General-purpose register 10.
    R10,
    /// Program counter: byte address of the next instruction to fetch.
    Pc,
    /// Frame pointer.
    Fp,
    /// Stack pointer; the stack grows downward.
    Sp,
    /// Return address register.
    Ra,
    /// Condition-code register.
    Flags,
}

impl Reg {
    /// All registers in index order.
    pub const ALL: [Self; REG_COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
        Self::R8,
        Self::R9,
        Self::R10,
        Self::Pc,
        Self::Fp,
        Self::Sp,
        Self::Ra,
        Self::Flags,
    ];

    /// Maps a 4-bit operand field to its register.
    ///
    /// Only the low four bits of `idx` are used, so every field value names a register.
    #[inline(always)]
    pub const fn from_index(idx: u32) -> Self {
        Self::ALL[(idx & 0xF) as usize]
    }

    /// Returns the register's index in the register file.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the assembler name (`r0`..`r10`, `pc`, `fp`, `sp`, `ra`, `fl`).
    pub const fn name(self) -> &'static str {
        abi::REG_NAMES[self as usize]
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The sixteen 32-bit architectural registers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; REG_COUNT],
}

impl RegisterFile {
    /// Creates a register file with every register set to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; REG_COUNT],
        }
    }

    /// Reads a register.
    #[inline(always)]
    pub const fn read(&self, reg: Reg) -> u32 {
        self.regs[reg as usize]
    }

    /// Writes a register.
    #[inline(always)]
    pub const fn write(&mut self, reg: Reg, val: u32) {
        self.regs[reg as usize] = val;
    }

    /// Program counter.
    #[inline(always)]
    pub const fn pc(&self) -> u32 {
        self.read(Reg::Pc)
    }

    /// Sets the program counter.
    #[inline(always)]
    pub const fn set_pc(&mut self, val: u32) {
        self.write(Reg::Pc, val);
    }

    /// Stack pointer.
    #[inline(always)]
    pub const fn sp(&self) -> u32 {
        self.read(Reg::Sp)
    }

    /// Sets the stack pointer.
    #[inline(always)]
    pub const fn set_sp(&mut self, val: u32) {
        self.write(Reg::Sp, val);
    }

    /// Frame pointer.
    pub const fn fp(&self) -> u32 {
        self.read(Reg::Fp)
    }

    /// Return address register.
    pub const fn ra(&self) -> u32 {
        self.read(Reg::Ra)
    }

    /// Condition codes.
    #[inline(always)]
    pub const fn flags(&self) -> Flags {
        Flags::from_bits(self.read(Reg::Flags))
    }

    /// Replaces the condition codes.
    #[inline(always)]
    pub const fn set_flags(&mut self, flags: Flags) {
        self.write(Reg::Flags, flags.bits());
    }

    /// Takes an immutable copy of every register.
    pub const fn snapshot(&self) -> RegisterSnapshot {
        RegisterSnapshot { regs: self.regs }
    }
}

/// Point-in-time copy of the register file, handed to observers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegisterSnapshot {
    regs: [u32; REG_COUNT],
}

impl RegisterSnapshot {
    /// Value of `reg` when the snapshot was taken.
    pub const fn get(&self, reg: Reg) -> u32 {
        self.regs[reg as usize]
    }

    /// Raw register values in index order.
    pub const fn values(&self) -> &[u32; REG_COUNT] {
        &self.regs
    }

    /// Registers whose value differs between `self` and `other`.
    pub fn changed<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = Reg> + 'a {
        Reg::ALL
            .into_iter()
            .filter(move |&r| self.get(r) != other.get(r))
    }
}
