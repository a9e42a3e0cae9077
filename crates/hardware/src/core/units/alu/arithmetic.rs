//! ALU arithmetic operations.
//!
//! Implements integer addition, subtraction, multiplication and signed
//! division for 64-bit and 32-bit word variants. 32-bit results are
//! sign-extended from bit 31.

use super::AluOp;

/// Number of bits in XLEN for RV64 (used for high-multiply shift).
const XLEN_BITS: u32 = 64;

/// Executes an integer arithmetic operation.
///
/// Division by zero yields all ones (quotient) or the dividend (remainder);
/// `MIN / -1` yields `MIN` with remainder zero. Returns `0` for non-arithmetic opcodes.
pub fn execute(op: AluOp, a: u64, b: u64, is32: bool) -> u64 {
    match op {
        AluOp::Add if is32 => (a as i32).wrapping_add(b as i32) as i64 as u64,
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub if is32 => (a as i32).wrapping_sub(b as i32) as i64 as u64,
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul if is32 => (a as i32).wrapping_mul(b as i32) as i64 as u64,
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Mulh => (((a as i64 as i128) * (b as i64 as i128)) >> XLEN_BITS) as u64,
        AluOp::Div => {
            if b == 0 {
                u64::MAX
            } else {
                (a as i64).wrapping_div(b as i64) as u64
            }
        }
        AluOp::Rem => {
            if b == 0 {
                a
            } else {
                (a as i64).wrapping_rem(b as i64) as u64
            }
        }
        _ => 0,
    }
}
