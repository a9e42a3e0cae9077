//! # Core Unit Tests
