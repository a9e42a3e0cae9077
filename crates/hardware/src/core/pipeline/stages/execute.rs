//! Execute (EX) Stage.
//!
//! This module implements the execution stage of the pipeline. It performs:
//! 1. **Forwarding:** Operands are read with the WriteBack slot's value bypassing the
//!    register file (see [`hazards`](crate::core::pipeline::hazards)).
//! 2. **Computation:** ALU results, upper immediates, effective addresses and link values.
//! 3. **Control Flow:** Branch conditions and jump targets; a taken branch or jump
//!    redirects the PC and discards the instruction in the Decode slot.
//! 4. **System Calls:** `ecall` dispatch, including the exit syscall.
//!
//! The instruction then moves into the AccessMemory slot.

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::hazards::{Operands, is_load_use};
use crate::core::units::alu::{Alu, AluOp};
use crate::isa::instruction::{Instruction, OpKind};

/// Executes the execute stage of the pipeline.
///
/// # Errors
///
/// Propagates syscall failures (unknown number, console or memory faults).
pub fn execute_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    let Some(mut inst) = cpu.pipeline.execute.take() else {
        return Ok(());
    };

    let retiring = cpu.pipeline.writeback.as_ref();
    if is_load_use(&inst, retiring) {
        cpu.stats.stalls_data += 1;
    }
    let ops = Operands::gather(&cpu.regs, &inst, retiring);

    let redirect = if inst.op == OpKind::Ecall {
        cpu.handle_syscall(&mut inst, &ops)?;
        None
    } else {
        compute(&mut inst, &ops)
    };

    if cpu.trace {
        tracing::debug!(
            stage = "EX",
            pc = format_args!("{:#x}", inst.pc),
            result = format_args!("{:#x}", inst.wb_value),
            taken = redirect.is_some(),
            "{inst}"
        );
    }

    if let Some(target) = redirect {
        cpu.pc = target;
        cpu.pipeline.decode = None;
        cpu.stats.stalls_control += 1;
    }

    cpu.pipeline.memory = Some(inst);
    Ok(())
}

/// Computes the deferred value, effective address or control-flow outcome of `inst`.
///
/// # Returns
///
/// The new PC if `inst` is a taken branch or a jump.
pub fn compute(inst: &mut Instruction, ops: &Operands) -> Option<u64> {
    let src1 = ops.base(inst.base_role());
    let imm = inst.imm as u64;
    let target = inst.pc.wrapping_add(imm);

    match inst.op {
        OpKind::Li | OpKind::Lui => inst.wb_value = imm,
        OpKind::Auipc => inst.wb_value = target,
        OpKind::Mv => inst.wb_value = ops.rs2,
        OpKind::Jal | OpKind::J => {
            inst.wb_value = inst.next_pc();
            return Some(target);
        }
        OpKind::Jalr | OpKind::Jr => {
            inst.wb_value = inst.next_pc();
            return Some(src1.wrapping_add(imm) & !1);
        }
        op if op.is_load() || op.is_store() => inst.mem_addr = src1.wrapping_add(imm),
        op if op.is_branch() => {
            return Alu::branch_taken(op, src1, ops.rs2).then_some(target);
        }
        op => {
            if let Some((alu_op, is32)) = AluOp::from_kind(op) {
                let src2 = if op.reads_rs2() { ops.rs2 } else { imm };
                inst.wb_value = Alu::execute(alu_op, src1, src2, is32);
            }
        }
    }
    None
}
