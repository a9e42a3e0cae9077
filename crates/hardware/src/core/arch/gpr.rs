//! RISC-V General-Purpose Register File.
//!
//! This module implements the integer register file. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Debugging:** Formats the complete register state with ABI names.

use std::fmt::Write as _;

use crate::common::constants::GPR_COUNT;
use crate::isa::abi;

/// General-Purpose Register file.
///
/// Register `x0` is hardwired to zero and cannot be modified.
#[derive(Clone, Debug, Default)]
pub struct Gpr {
    regs: [u64; GPR_COUNT],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 64-bit value stored in the specified register. Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 64-bit value to write.
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Formats all registers in pairs, hexadecimal, labelled with ABI names.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for i in (0..GPR_COUNT).step_by(2) {
            let _ = writeln!(
                out,
                "x{:<2} ({:>4}) = {:#018x}   x{:<2} ({:>4}) = {:#018x}",
                i,
                abi::name(i),
                self.read(i),
                i + 1,
                abi::name(i + 1),
                self.read(i + 1)
            );
        }
        out
    }
}
