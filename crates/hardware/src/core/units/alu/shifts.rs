//! ALU shift operations.
//!
//! Shift amounts are masked to 6 bits for 64-bit operations and 5 bits for
//! the W variants, whose results are sign-extended from bit 31.

use super::AluOp;

/// Shift amount mask for 64-bit shifts.
const SHAMT_MASK_64: u64 = 0x3f;

/// Shift amount mask for 32-bit shifts.
const SHAMT_MASK_32: u64 = 0x1f;

/// Executes a shift operation. Returns `0` for non-shift opcodes.
pub fn execute(op: AluOp, a: u64, b: u64, is32: bool) -> u64 {
    if is32 {
        let sh = (b & SHAMT_MASK_32) as u32;
        let word = match op {
            AluOp::Sll => (a as u32) << sh,
            AluOp::Srl => (a as u32) >> sh,
            AluOp::Sra => ((a as i32) >> sh) as u32,
            _ => return 0,
        };
        return word as i32 as i64 as u64;
    }
    let sh = (b & SHAMT_MASK_64) as u32;
    match op {
        AluOp::Sll => a << sh,
        AluOp::Srl => a >> sh,
        AluOp::Sra => ((a as i64) >> sh) as u64,
        _ => 0,
    }
}
