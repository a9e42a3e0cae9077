//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage. It handles
//! arithmetic, logical operations and shifts for both 64-bit and 32-bit ("W")
//! operands, the supported multiply/divide subset, and branch condition evaluation.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Mulh, Div, Rem
//! - [`logic`]:      Or, And, Xor, Slt
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::isa::instruction::OpKind;

/// Operation selected for the ALU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiply, low half.
    Mul,
    /// Multiply signed x signed, high half.
    Mulh,
    /// Signed division.
    Div,
    /// Signed remainder.
    Rem,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Bitwise XOR.
    Xor,
    /// Set if less than, signed.
    Slt,
    /// Shift left logical.
    Sll,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
}

impl AluOp {
    /// Maps an operation kind to its ALU operation and word-size flag.
    ///
    /// # Returns
    ///
    /// `Some((op, is32))` for arithmetic kinds, `None` for memory, control and system kinds.
    pub const fn from_kind(kind: OpKind) -> Option<(Self, bool)> {
        let mapped = match kind {
            OpKind::Add | OpKind::Addi => (Self::Add, false),
            OpKind::Addw | OpKind::Addiw => (Self::Add, true),
            OpKind::Sub => (Self::Sub, false),
            OpKind::Subw => (Self::Sub, true),
            OpKind::Mul => (Self::Mul, false),
            OpKind::Mulw => (Self::Mul, true),
            OpKind::Mulh => (Self::Mulh, false),
            OpKind::Div => (Self::Div, false),
            OpKind::Rem => (Self::Rem, false),
            OpKind::Or | OpKind::Ori => (Self::Or, false),
            OpKind::And | OpKind::Andi => (Self::And, false),
            OpKind::Xor | OpKind::Xori => (Self::Xor, false),
            OpKind::Slt | OpKind::Slti => (Self::Slt, false),
            OpKind::Sll | OpKind::Slli => (Self::Sll, false),
            OpKind::Sllw | OpKind::Slliw => (Self::Sll, true),
            OpKind::Srl | OpKind::Srli => (Self::Srl, false),
            OpKind::Srlw | OpKind::Srliw => (Self::Srl, true),
            OpKind::Sra | OpKind::Srai => (Self::Sra, false),
            OpKind::Sraw | OpKind::Sraiw => (Self::Sra, true),
            _ => return None,
        };
        Some(mapped)
    }
}

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op`   - The ALU operation to perform
    /// * `a`    - First operand
    /// * `b`    - Second operand (register value, immediate, or shift amount)
    /// * `is32` - If true, operate on the low 32 bits and sign-extend the result
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8, false), 50);
    /// assert_eq!(Alu::execute(AluOp::Add, 0x7FFF_FFFF, 1, true), 0xFFFF_FFFF_8000_0000);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i64 as u64, 10, false), 1);
    /// ```
    pub fn execute(op: AluOp, a: u64, b: u64, is32: bool) -> u64 {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Mul | AluOp::Mulh | AluOp::Div | AluOp::Rem => {
                arithmetic::execute(op, a, b, is32)
            }
            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt => logic::execute(op, a, b),
            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b, is32),
        }
    }

    /// Evaluates a conditional branch.
    ///
    /// `BEQZ`/`BNEZ` compare `a` against zero and ignore `b`. Non-branch kinds return `false`.
    pub const fn branch_taken(kind: OpKind, a: u64, b: u64) -> bool {
        match kind {
            OpKind::Beq => a == b,
            OpKind::Bne => a != b,
            OpKind::Blt => (a as i64) < (b as i64),
            OpKind::Bge => (a as i64) >= (b as i64),
            OpKind::Bltu => a < b,
            OpKind::Bgeu => a >= b,
            OpKind::Beqz => a == 0,
            OpKind::Bnez => a != 0,
            _ => false,
        }
    }
}
