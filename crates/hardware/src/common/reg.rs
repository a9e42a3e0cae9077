//! Register File.
//!
//! This module provides the `RegisterFile` struct, the interface the pipeline uses to
//! read operands and commit results. It provides:
//! 1. **Storage:** The 32 architectural integer registers.
//! 2. **Invariant:** `x0` reads as zero on every cycle regardless of writes.
//! 3. **Observability:** A formatted dump for the fatal-error state report.

use crate::core::arch::gpr::Gpr;

/// Architectural register file, exclusively owned by the execution engine.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    gpr: Gpr,
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self { gpr: Gpr::new() }
    }

    /// Reads a value from a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u64 {
        self.gpr.read(idx)
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The 64-bit value to write.
    pub fn write(&mut self, idx: usize, val: u64) {
        self.gpr.write(idx, val);
    }

    /// Formats the contents of all general-purpose registers.
    pub fn dump(&self) -> String {
        self.gpr.dump()
    }
}
