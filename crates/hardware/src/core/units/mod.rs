//! Execution units and functional components.
//!
//! This module contains the integer ALU used by the Execute stage and the
//! set-associative cache that implements a level of the storage chain.

/// Arithmetic Logic Unit for integer operations and branch conditions.
pub mod alu;

/// Set-associative cache level.
pub mod cache;
