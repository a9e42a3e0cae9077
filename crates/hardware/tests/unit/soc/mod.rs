//! Memory system tests.
