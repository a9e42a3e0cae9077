//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the stages of the
//! instruction pipeline. It includes:
//! 1. **Fetch:** Reads the next code word at the PC into the Decode slot.
//! 2. **Decode:** Turns the fetched word into an instruction record.
//! 3. **Execute:** Forwards operands, computes results and resolves branches and syscalls.
//! 4. **Memory:** Performs loads and stores through the storage chain.
//! 5. **Writeback:** Commits results to the register file and retires.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
