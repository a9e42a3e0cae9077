//! Memory System Components.
//!
//! This module organizes everything behind the pipeline's memory port: the
//! sparse address space holding program data, the storage chain that models
//! access timing, and the console device used by syscalls.

/// Storage chain construction from configuration.
pub mod builder;

/// Console device for the I/O syscalls.
pub mod devices;

/// Sparse address space and the terminal backing memory level.
pub mod memory;

/// Storage level trait.
pub mod traits;

pub use builder::build_hierarchy;
pub use memory::AddressSpace;
pub use traits::Storage;
