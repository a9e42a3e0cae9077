//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Constants:** Page geometry and instruction widths.
//! 2. **Memory Access:** Classification of requests travelling down the storage chain.
//! 3. **Error Handling:** Typed fatal conditions for memory, decode, syscalls and configuration.
//! 4. **Register Management:** The architectural register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types for every fatal simulation condition.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{PAGE_SHIFT, PAGE_SIZE};
pub use data::AccessType;
pub use error::{ConfigError, DecodeError, MemoryError, SimError};
pub use reg::RegisterFile;
