//! Architecture-specific components.
//!
//! This module contains architectural state definitions that are not plain
//! registers. It currently holds the condition-code encoding used by the
//! `FLAGS` register and by conditional jumps.

/// Condition-code flags and flag sets.
pub mod flags;
