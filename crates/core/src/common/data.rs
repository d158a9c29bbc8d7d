//! Memory access kinds.
//!
//! This module defines the classification of memory references replayed
//! through the hierarchy. The kind is used for the following:
//! 1. **Statistics Tracking:** Hit/miss counters are kept per kind and level.
//! 2. **Allocation Decisions:** Stores may bypass L1 allocation under a
//!    no-allocate configuration; loads always allocate.

use std::fmt;

/// Kind of memory access being simulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    /// Data read access (a load instruction in the traced program).
    Load,

    /// Data write access (a store instruction in the traced program).
    Store,
}

impl AccessKind {
    /// All access kinds, in counter-index order.
    pub const ALL: [Self; 2] = [Self::Load, Self::Store];
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "Load"),
            Self::Store => write!(f, "Store"),
        }
    }
}
