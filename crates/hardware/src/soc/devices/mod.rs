//! Devices reachable from the simulated program.
//!
//! The only device is the console behind the I/O syscalls.

/// Console I/O (stdin/stdout or in-memory buffers).
pub mod console;

pub use console::{BufferConsole, Console, StdConsole};
