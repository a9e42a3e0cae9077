//! Instruction Decode (ID) Stage.
//!
//! Decodes the code word in the Decode slot into an instruction record tagged with its
//! fetch PC and moves it into the Execute slot. An undecodable word is fatal, as is a
//! word whose fetch faulted.

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::isa::decode::decode;

/// Executes the instruction decode stage.
///
/// # Errors
///
/// [`SimError::Decode`] with the PC of the offending word, or [`SimError::Memory`] for
/// a fetch fault carried in the slot.
pub fn decode_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    let Some(fetched) = cpu.pipeline.decode.take() else {
        return Ok(());
    };
    if let Some(source) = fetched.fault {
        return Err(SimError::Memory {
            pc: fetched.pc,
            source,
        });
    }

    let mut inst = decode(fetched.raw).map_err(|source| SimError::Decode {
        pc: fetched.pc,
        source,
    })?;
    inst.pc = fetched.pc;

    if cpu.trace {
        tracing::debug!(stage = "ID", pc = format_args!("{:#x}", inst.pc), "{inst}");
    }

    cpu.pipeline.execute = Some(inst);
    Ok(())
}
