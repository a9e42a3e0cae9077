//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains opcode tables, the instruction record and the two decoders.
//!
//! # Extensions
//!
//! * `rv64i`: Base Integer Instruction Set (64-bit) plus the supported multiply/divide subset.
//! * `rvc`: Compressed Instructions.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Instruction decoding for full-width encodings and width dispatch.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction record, format and operation kinds.
pub mod instruction;

/// Base integer instruction set (64-bit RISC-V core instructions).
pub mod rv64i;

/// Compressed instruction extension (16-bit instruction encoding).
pub mod rvc;

pub use decode::decode;
pub use instruction::{Format, Instruction, OpKind};
