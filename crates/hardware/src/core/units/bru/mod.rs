//! Branch Resolution Unit (BRU).
//!
//! Resolves conditional jumps against the condition-code register. Each
//! condition is a mask over the `P`/`N`/`Z` bits; the jump is taken when any
//! bit of the mask is set in `FLAGS`.

use serde::Serialize;

use crate::core::arch::flags::Flags;

/// Jump condition selected by the jump family's subopcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Condition {
    /// Any condition code set.
    Always,
    /// Last result was zero.
    Equal,
    /// Last result was non-zero.
    NotEqual,
    /// Last result was negative.
    Less,
    /// Last result was positive.
    Greater,
    /// Last result was positive or zero.
    GreaterEqual,
    /// Last result was negative or zero.
    LessEqual,
}

impl Condition {
    /// Every condition, in subopcode order.
    pub const ALL: [Self; 7] = [
        Self::Always,
        Self::Equal,
        Self::NotEqual,
        Self::Less,
        Self::Greater,
        Self::GreaterEqual,
        Self::LessEqual,
    ];

    /// Flag mask tested by this condition.
    pub const fn flag_set(self) -> Flags {
        match self {
            Self::Always => Flags::ALL,
            Self::Equal => Flags::ZERO,
            Self::NotEqual => Flags::NEGATIVE.union(Flags::POSITIVE),
            Self::Less => Flags::NEGATIVE,
            Self::Greater => Flags::POSITIVE,
            Self::GreaterEqual => Flags::POSITIVE.union(Flags::ZERO),
            Self::LessEqual => Flags::NEGATIVE.union(Flags::ZERO),
        }
    }

    /// Returns `true` if any bit of this condition's mask is set in `flags`.
    ///
    /// `Always` tests every bit, so it falls through only when `FLAGS` has been
    /// cleared by a direct write.
    ///
    /// # Examples
    ///
    /// ```
    /// use w32sim_core::core::arch::flags::Flags;
    /// use w32sim_core::core::units::bru::Condition;
    ///
    /// assert!(Condition::LessEqual.is_taken(Flags::ZERO));
    /// assert!(!Condition::Greater.is_taken(Flags::NEGATIVE));
    /// assert!(!Condition::Always.is_taken(Flags::NONE));
    /// ```
    pub const fn is_taken(self, flags: Flags) -> bool {
        flags.intersects(self.flag_set())
    }

    /// Assembly mnemonic for the jump carrying this condition.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Always => "jmp",
            Self::Equal => "je",
            Self::NotEqual => "jne",
            Self::Less => "jl",
            Self::Greater => "jg",
            Self::GreaterEqual => "jge",
            Self::LessEqual => "jle",
        }
    }
}
