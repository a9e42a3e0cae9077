//! Writeback (WB) Stage.
//!
//! Final stage of the pipeline. Commits the deferred value of the instruction in the
//! WriteBack slot to the register file and retires it. Writes to `x0` are discarded by
//! the register file.

use crate::core::Cpu;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
pub fn wb_stage(cpu: &mut Cpu) {
    let Some(inst) = cpu.pipeline.writeback.take() else {
        return;
    };

    if inst.writes_reg {
        cpu.regs.write(inst.rd, inst.wb_value);
    }
    cpu.stats.record_retire(inst.op);

    if cpu.trace {
        tracing::debug!(
            stage = "WB",
            pc = format_args!("{:#x}", inst.pc),
            rd = ?inst.writes_reg.then_some(inst.rd),
            value = format_args!("{:#x}", inst.wb_value),
            "{inst}"
        );
    }
}
