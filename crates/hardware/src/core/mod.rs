//! Core processor implementation.
//!
//! This module contains the CPU, the four-slot instruction pipeline, the
//! architectural register state and the execution units (ALU and caches).

/// Architecture-specific components (general-purpose register file).
pub mod arch;

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards).
pub mod pipeline;

/// Execution units (ALU, cache).
pub mod units;

pub use self::cpu::Cpu;
