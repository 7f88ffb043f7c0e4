//! Condition-Code Flags.
//!
//! This module implements the `FLAGS` register encoding. It performs the following:
//! 1. **Encoding:** Positive, Negative and Zero occupy bits 0, 1 and 2.
//! 2. **Flag Computation:** Derives the single flag describing an ALU result's sign.
//! 3. **Flag Sets:** Unions of flags used as branch-condition masks.

use std::fmt;
use std::ops::BitOr;

use serde::Serialize;

/// A set of condition-code bits.
///
/// After any flag-updating instruction the register holds exactly one of
/// [`Flags::POSITIVE`], [`Flags::NEGATIVE`] or [`Flags::ZERO`]. Unions of
/// these are used as branch-condition masks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Flags(u32);

impl Flags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Last result was greater than zero.
    pub const POSITIVE: Self = Self(1 << 0);
    /// Last result was negative when read as a signed value.
    pub const NEGATIVE: Self = Self(1 << 1);
    /// Last result was zero.
    pub const ZERO: Self = Self(1 << 2);
    /// Every condition.
    pub const ALL: Self = Self(Self::POSITIVE.0 | Self::NEGATIVE.0 | Self::ZERO.0);

    /// Wraps raw register bits.
    #[inline(always)]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw register bits.
    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Union of two flag sets.
    #[inline(always)]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if any bit is set in both sets.
    #[inline(always)]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Computes the flag for an ALU result from its signed interpretation.
    ///
    /// # Examples
    ///
    /// ```
    /// use w32sim_core::core::arch::flags::Flags;
    ///
    /// assert_eq!(Flags::from_result(0), Flags::ZERO);
    /// assert_eq!(Flags::from_result(0x8000_0000), Flags::NEGATIVE);
    /// assert_eq!(Flags::from_result(7), Flags::POSITIVE);
    /// ```
    #[inline(always)]
    pub const fn from_result(value: u32) -> Self {
        let signed = value as i32;
        if signed == 0 {
            Self::ZERO
        } else if signed < 0 {
            Self::NEGATIVE
        } else {
            Self::POSITIVE
        }
    }
}

impl BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for Flags {
    /// Formats as the letters of the set flags in `NZP` order, or `-` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.intersects(Self::ALL) {
            return f.write_str("-");
        }
        for (flag, letter) in [(Self::NEGATIVE, 'N'), (Self::ZERO, 'Z'), (Self::POSITIVE, 'P')] {
            if self.intersects(flag) {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}
