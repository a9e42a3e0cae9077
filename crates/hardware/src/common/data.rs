//! Memory Access Types.
//!
//! This module defines the classification of requests sent through the storage chain.
//! These types are used for the following:
//! 1. **Policy Selection:** Caches apply write-back/write-through and allocate rules on writes only.
//! 2. **Statistics Tracking:** Trace events record which kind of access missed.

/// Type of memory access operation.
///
/// Instruction fetches are modelled as reads of the instruction stream, so only
/// reads and writes reach a storage level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Data or instruction read.
    Read,

    /// Data write from a store instruction or a victim write-back.
    Write,
}

impl AccessType {
    /// Returns `true` for [`AccessType::Read`].
    pub const fn is_read(self) -> bool {
        matches!(self, Self::Read)
    }
}
