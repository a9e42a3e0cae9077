//! Memory Access (MEM) Stage.
//!
//! Loads read the address space at the effective address computed by Execute and
//! replace the instruction's deferred value with the sign- or zero-extended result.
//! Stores write the current value of `rs2`; by the time a store reaches this stage the
//! instruction ahead of it has already committed. Every access is timed by the storage
//! chain. The instruction then moves into the WriteBack slot.

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::isa::instruction::OpKind;

/// Executes the memory access stage of the pipeline.
///
/// # Errors
///
/// [`SimError::Memory`] if a load reads unmapped memory or an access is malformed.
pub fn mem_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    let Some(mut inst) = cpu.pipeline.memory.take() else {
        return Ok(());
    };

    if let Some(size) = inst.op.access_size() {
        if inst.op.is_load() {
            let raw = cpu.load(inst.pc, inst.mem_addr, size)?;
            inst.wb_value = extend_load(inst.op, raw);
        } else {
            let value = cpu.regs.read(inst.rs2);
            cpu.store(inst.pc, inst.mem_addr, size, value)?;
        }
        if cpu.trace {
            tracing::debug!(
                stage = "MEM",
                pc = format_args!("{:#x}", inst.pc),
                addr = format_args!("{:#x}", inst.mem_addr),
                "{inst}"
            );
        }
    }

    cpu.pipeline.writeback = Some(inst);
    Ok(())
}

/// Extends a raw little-endian load result according to the load kind.
fn extend_load(op: OpKind, raw: u64) -> u64 {
    match op {
        OpKind::Lb => raw as u8 as i8 as i64 as u64,
        OpKind::Lh => raw as u16 as i16 as i64 as u64,
        OpKind::Lw | OpKind::Lwsp => raw as u32 as i32 as i64 as u64,
        _ => raw,
    }
}
