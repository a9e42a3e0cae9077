//! Data Hazard Detection and Forwarding.
//!
//! This module resolves read-after-write dependencies between the instruction in the
//! Execute slot and the one that has just moved into the WriteBack slot. It provides:
//! 1. **Operand Forwarding:** Six operand roles (rs1, rs2, rd-as-source, sp, a7, a0)
//!    take the write-back value when the retiring instruction targets the same register.
//! 2. **Hazard Detection:** Load-use dependencies, reported for statistics only.
//!
//! Nothing is forwarded from the AccessMemory slot. Stages run in reverse order, so
//! the instruction two ahead has already committed when Execute reads the register file.

use crate::common::RegisterFile;
use crate::isa::abi::{REG_A0, REG_A7, REG_SP};
use crate::isa::instruction::{BaseRole, Instruction};

/// Source operand values after forwarding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operands {
    /// Value of `rs1`.
    pub rs1: u64,
    /// Value of `rs2`.
    pub rs2: u64,
    /// Value of `rd`, for compressed forms that read their destination.
    pub rd: u64,
    /// Stack pointer.
    pub sp: u64,
    /// Syscall number register.
    pub a7: u64,
    /// Syscall argument register.
    pub a0: u64,
}

impl Operands {
    /// Reads the operands of `inst`, bypassing the register file when `retiring`
    /// writes the same register.
    ///
    /// # Arguments
    ///
    /// * `regs` - Architectural register file.
    /// * `inst` - Instruction in the Execute slot.
    /// * `retiring` - Instruction in the WriteBack slot, if any.
    pub fn gather(regs: &RegisterFile, inst: &Instruction, retiring: Option<&Instruction>) -> Self {
        let read = |idx: usize| forward(regs, retiring, idx);
        Self {
            rs1: read(inst.rs1),
            rs2: read(inst.rs2),
            rd: read(inst.rd),
            sp: read(REG_SP),
            a7: read(REG_A7),
            a0: read(REG_A0),
        }
    }

    /// First ALU source, selected by the instruction's base role.
    pub const fn base(&self, role: BaseRole) -> u64 {
        match role {
            BaseRole::Rs1 => self.rs1,
            BaseRole::Rd => self.rd,
            BaseRole::Sp => self.sp,
        }
    }
}

/// Reads register `idx`, taking the retiring instruction's value if it writes `idx`.
///
/// Register `x0` is never forwarded and always reads as zero.
pub fn forward(regs: &RegisterFile, retiring: Option<&Instruction>, idx: usize) -> u64 {
    match retiring {
        Some(wb) if idx != 0 && wb.writes_reg && wb.rd == idx => wb.wb_value,
        _ => regs.read(idx),
    }
}

/// Returns `true` if `retiring` is a load whose destination `inst` reads.
///
/// # Examples
///
/// ```
/// use pipesim_core::core::pipeline::hazards::is_load_use;
/// use pipesim_core::isa::decode::decode;
///
/// let load = decode(0x0004_2283).unwrap(); // lw t0, 0(s0)
/// let add = decode(0x0052_8333).unwrap(); // add t1, t0, t0
/// assert!(is_load_use(&add, Some(&load)));
/// ```
pub fn is_load_use(inst: &Instruction, retiring: Option<&Instruction>) -> bool {
    match retiring {
        Some(wb) if wb.op.is_load() && wb.rd != 0 => inst.source_registers().contains(&wb.rd),
        _ => false,
    }
}
