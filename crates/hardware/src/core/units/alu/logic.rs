//! ALU logical and comparison operations.
//!
//! Bitwise OR, AND, XOR and signed set-less-than. These always use the
//! full 64 bits; the result of `Slt` is 0 or 1.

use super::AluOp;

/// Executes a logical or comparison operation. Returns `0` for other opcodes.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Xor => a ^ b,
        AluOp::Slt => u64::from((a as i64) < (b as i64)),
        _ => 0,
    }
}
