//! Pipelined RISC-V simulator library.
//!
//! This crate implements a cycle-level RV64 simulator with compressed-instruction support:
//! 1. **Core:** A four-slot pipeline (decode, execute, memory, writeback) fed by fetch,
//!    with write-back forwarding, load-use accounting and branch squashing.
//! 2. **Memory:** A sparse page-granular address space timed by a chain of
//!    set-associative caches over a fixed-latency backing memory.
//! 3. **ISA:** Decoding and disassembly of the supported RV64I/M and RVC subset.
//! 4. **System:** Syscall dispatch over a pluggable console.
//! 5. **Simulation:** ELF loading, configuration, and statistics collection.

/// Common types and constants (errors, access types, register file).
pub mod common;
/// Simulator configuration (defaults, cache hierarchy structures).
pub mod config;
/// CPU core (pipeline, arch, execution units, syscalls).
pub mod core;
/// Instruction set (decode, instruction record, ABI, RV64I, RVC, disassembly).
pub mod isa;
/// ELF loader and top-level simulator.
pub mod sim;
/// Memory system (address space, storage levels, hierarchy builder, console).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds pipeline, registers, memory and stats.
pub use crate::core::Cpu;
/// Top-level driver; construct with `Simulator::new` or `Simulator::from_elf`.
pub use crate::sim::Simulator;
