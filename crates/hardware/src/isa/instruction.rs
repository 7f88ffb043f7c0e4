//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction functions and structures for decoding
//! instruction fields from 32-bit instruction words.
//!
//! ```text
//!  31    28 27    24 23    20 19    16 15    12 11                  0
//! +--------+--------+--------+--------+--------+---------------------+
//! | opcode | subop  |   dr   |sr1/base|  sr2   |        off12        |
//! +--------+--------+--------+--------+--------+---------------------+
//!                                     |        imm16 / off16         |
//!                                     +------------------------------+
//! ```

use crate::common::reg::Reg;

/// Bit position of the opcode field (bits 28-31).
pub const OPCODE_SHIFT: u32 = 28;
/// Bit position of the subopcode field (bits 24-27).
pub const SUBOP_SHIFT: u32 = 24;
/// Bit position of the destination register field (bits 20-23).
pub const DR_SHIFT: u32 = 20;
/// Bit position of the first source / base register field (bits 16-19).
pub const SR1_SHIFT: u32 = 16;
/// Bit position of the second source register field (bits 12-15).
pub const SR2_SHIFT: u32 = 12;

/// Mask for any 4-bit field once shifted down.
pub const NIBBLE_MASK: u32 = 0xF;
/// Mask for the 16-bit immediate / offset field.
pub const IMM16_MASK: u32 = 0xFFFF;
/// Mask for the 12-bit scale field.
pub const OFF12_MASK: u32 = 0xFFF;

/// Extracts bits `low..=high` of `x`, shifted down to bit 0.
///
/// Every field accessor is derived from this primitive.
///
/// # Examples
///
/// ```
/// use w32sim_core::isa::instruction::extract;
///
/// assert_eq!(extract(0x1400_0000, 28, 31), 0x1);
/// assert_eq!(extract(0x1400_0000, 24, 27), 0x4);
/// assert_eq!(extract(0xFFFF_FFFF, 0, 31), 0xFFFF_FFFF);
/// ```
#[inline(always)]
pub const fn extract(x: u32, low: u32, high: u32) -> u32 {
    let width = high - low + 1;
    let mask = if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    };
    (x >> low) & mask
}

/// Sign-extends a 16-bit field to 32 bits.
#[inline(always)]
pub const fn sign_extend16(field: u16) -> u32 {
    field as i16 as i32 as u32
}

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Instruction family (bits 28-31).
    fn opcode(&self) -> u32;
    /// Variant within the family (bits 24-27).
    fn subop(&self) -> u32;
    /// Destination register (bits 20-23).
    fn dr(&self) -> Reg;
    /// First source register (bits 16-19).
    fn sr1(&self) -> Reg;
    /// Base register for addressing; the same field as `sr1`.
    fn base(&self) -> Reg;
    /// Second source register (bits 12-15).
    fn sr2(&self) -> Reg;
    /// 16-bit immediate or offset (bits 0-15), unextended.
    fn imm16(&self) -> u16;
    /// 12-bit scale used by scaled-index addressing (bits 0-11).
    fn off12(&self) -> u16;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        extract(*self, OPCODE_SHIFT, 31)
    }

    #[inline(always)]
    fn subop(&self) -> u32 {
        extract(*self, SUBOP_SHIFT, OPCODE_SHIFT - 1)
    }

    #[inline(always)]
    fn dr(&self) -> Reg {
        Reg::from_index(extract(*self, DR_SHIFT, SUBOP_SHIFT - 1))
    }

    #[inline(always)]
    fn sr1(&self) -> Reg {
        Reg::from_index(extract(*self, SR1_SHIFT, DR_SHIFT - 1))
    }

    #[inline(always)]
    fn base(&self) -> Reg {
        self.sr1()
    }

    #[inline(always)]
    fn sr2(&self) -> Reg {
        Reg::from_index(extract(*self, SR2_SHIFT, SR1_SHIFT - 1))
    }

    #[inline(always)]
    fn imm16(&self) -> u16 {
        extract(*self, 0, 15) as u16
    }

    #[inline(always)]
    fn off12(&self) -> u16 {
        extract(*self, 0, 11) as u16
    }
}

/// Decoded instruction structure containing all extracted fields.
///
/// The decoder never retains the source word beyond the `raw` copy kept
/// for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// Raw 32-bit instruction encoding.
    pub raw: u32,
    /// Instruction family.
    pub opcode: u32,
    /// Variant within the family.
    pub subop: u32,
    /// Destination register.
    pub dr: Reg,
    /// First source / base register.
    pub sr1: Reg,
    /// Second source register.
    pub sr2: Reg,
    /// 16-bit immediate or offset, unextended.
    pub imm16: u16,
    /// 12-bit scale.
    pub off12: u16,
}

impl Decoded {
    /// Base register for addressing modes (alias of `sr1`).
    #[inline(always)]
    pub const fn base(&self) -> Reg {
        self.sr1
    }
}
