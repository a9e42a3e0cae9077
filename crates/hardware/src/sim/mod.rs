//! Simulation driver and program loading.
//!
//! Provides the ELF loader that populates an address space and the
//! [`Simulator`] that wires configuration, hierarchy and CPU together.

/// ELF image loading.
pub mod loader;

/// Top-level simulator.
pub mod simulator;

pub use loader::{LoadedImage, load_elf};
pub use simulator::Simulator;
