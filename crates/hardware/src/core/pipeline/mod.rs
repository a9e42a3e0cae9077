//! Instruction pipeline implementation.
//!
//! This module contains the four-slot in-order pipeline driven by the CPU each cycle.
//! It includes the following components:
//! 1. **Latches:** The Decode, Execute, AccessMemory and WriteBack slots.
//! 2. **Hazards:** Operand forwarding from write-back and load-use detection.
//! 3. **Stages:** Fetch, Decode, Execute, Memory and Writeback, run in reverse order.

/// Operand forwarding and hazard detection.
pub mod hazards;

/// Pipeline slots between stages.
pub mod latches;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;
