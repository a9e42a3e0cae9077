//! Architectural state.
//!
//! The only architectural state of the modelled core is the integer register file;
//! the program counter lives on [`crate::core::Cpu`].

/// General-purpose integer registers.
pub mod gpr;
