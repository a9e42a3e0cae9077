//! Loader and simulator driver tests.

/// ELF and raw binary loading.
pub mod loader;
