//! Instruction Disassembler.
//!
//! Renders a decoded [`Instruction`] as assembler text for debug tracing, the
//! step-mode debugger and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use pipesim_core::isa::decode::decode;
//! let inst = decode(0x00A00293).unwrap();
//! assert_eq!(inst.to_string(), "addi t0, zero, 10");
//! ```

use std::fmt;

use crate::isa::abi;
use crate::isa::instruction::{BaseRole, Instruction, OpKind};

/// Returns the ABI name for an integer register index.
#[inline]
fn xreg(idx: usize) -> &'static str {
    abi::name(idx)
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.op.mnemonic();
        let base = match self.base_role() {
            BaseRole::Rs1 => self.rs1,
            BaseRole::Rd => self.rd,
            BaseRole::Sp => abi::REG_SP,
        };
        match self.op {
            OpKind::Ecall => write!(f, "{m}"),
            OpKind::Lui | OpKind::Auipc => {
                write!(f, "{m} {}, {:#x}", xreg(self.rd), (self.imm >> 12) & 0xF_FFFF)
            }
            OpKind::Li => write!(f, "{m} {}, {}", xreg(self.rd), self.imm),
            OpKind::Mv => write!(f, "{m} {}, {}", xreg(self.rd), xreg(self.rs2)),
            OpKind::Jal => write!(f, "{m} {}, {}", xreg(self.rd), self.imm),
            OpKind::J => write!(f, "{m} {}", self.imm),
            OpKind::Jr => write!(f, "{m} {}", xreg(self.rs1)),
            OpKind::Jalr => write!(f, "{m} {}, {}({})", xreg(self.rd), self.imm, xreg(base)),
            OpKind::Beqz | OpKind::Bnez => write!(f, "{m} {}, {}", xreg(base), self.imm),
            op if op.is_branch() => write!(
                f,
                "{m} {}, {}, {}",
                xreg(self.rs1),
                xreg(self.rs2),
                self.imm
            ),
            op if op.is_load() => {
                write!(f, "{m} {}, {}({})", xreg(self.rd), self.imm, xreg(base))
            }
            op if op.is_store() => {
                write!(f, "{m} {}, {}({})", xreg(self.rs2), self.imm, xreg(base))
            }
            op if op.reads_rs2() => write!(
                f,
                "{m} {}, {}, {}",
                xreg(self.rd),
                xreg(base),
                xreg(self.rs2)
            ),
            _ => write!(f, "{m} {}, {}, {}", xreg(self.rd), xreg(base), self.imm),
        }
    }
}
