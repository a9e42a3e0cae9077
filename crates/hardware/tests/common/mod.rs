//! Shared test infrastructure.


/// `TestContext` harness.
pub mod harness;
