//! RISC-V Base Integer (I) Function Codes (funct7).
//!
//! The `funct7` field (bits 31-25) is used in R-type instructions to
//! distinguish between operations that share the same `funct3` (e.g., ADD vs SUB vs MUL).

/// Default operation (ADD, SRL, etc.).
pub const DEFAULT: u32 = 0b0000000;

/// Alternate operation (SUB, SRA).
pub const SUB: u32 = 0b0100000;
/// Alias for SUB (used for Shift Right Arithmetic).
pub const SRA: u32 = 0b0100000;

/// Multiply/divide group (MUL, MULH, DIV, REM, MULW).
pub const MULDIV: u32 = 0b0000001;

/// Upper six bits of an RV64 shift-immediate selecting SRAI.
pub const FUNCT6_SRA: u32 = 0b010000;
/// Upper six bits of an RV64 shift-immediate selecting SLLI/SRLI.
pub const FUNCT6_DEFAULT: u32 = 0b000000;
