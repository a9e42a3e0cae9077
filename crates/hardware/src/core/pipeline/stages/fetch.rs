//! Instruction Fetch (IF) Stage.
//!
//! Reads the code word at the PC into the Decode slot and advances the PC by the
//! encoded length: 2 bytes for compressed encodings, 4 otherwise. The access is
//! modelled as a 4-byte read of the instruction stream through the storage chain.
//!
//! A fetch from an unmapped PC is not fatal here. The fault travels in the Decode slot
//! and the PC advances by 4, since the older instruction ahead of it may still redirect.

use crate::common::constants::{
    COMPRESSED_INSTRUCTION_MASK, FULL_WIDTH_MARKER, INSTRUCTION_SIZE_16, INSTRUCTION_SIZE_32,
};
use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::latches::FetchedInstruction;

/// Executes the instruction fetch stage.
///
/// # Errors
///
/// Only failures other than a memory fault on the fetched word.
pub fn fetch_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    let pc = cpu.pc;
    let (raw, fault) = match cpu.fetch_word(pc) {
        Ok(raw) => (raw, None),
        Err(SimError::Memory { source, .. }) => {
            tracing::trace!(pc = format_args!("{pc:#x}"), %source, "fetch fault deferred");
            (0, Some(source))
        }
        Err(e) => return Err(e),
    };
    let len = if fault.is_some() || raw & COMPRESSED_INSTRUCTION_MASK == FULL_WIDTH_MARKER {
        INSTRUCTION_SIZE_32
    } else {
        INSTRUCTION_SIZE_16
    };

    if cpu.trace {
        tracing::debug!(
            stage = "IF",
            pc = format_args!("{pc:#x}"),
            raw = format_args!("{raw:#010x}"),
            "fetch"
        );
    }

    cpu.pipeline.decode = Some(FetchedInstruction { raw, pc, fault });
    cpu.pc = pc.wrapping_add(len);
    Ok(())
}
