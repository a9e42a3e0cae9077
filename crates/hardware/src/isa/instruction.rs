//! Instruction record and field extraction utilities.
//!
//! Provides the bit-extraction trait shared by both decoders and the semantic
//! `Instruction` record that travels through the pipeline. It provides:
//! 1. **Field Extraction:** `InstructionBits` for the fixed 32-bit field positions.
//! 2. **Classification:** `Format` and `OpKind`, the decoded format category and operation.
//! 3. **Record:** `Instruction`, owned by exactly one pipeline slot at a time.

use crate::common::constants::{
    COMPRESSED_INSTRUCTION_MASK, FULL_WIDTH_MARKER, INSTRUCTION_SIZE_16, INSTRUCTION_SIZE_32,
};
use crate::isa::abi::{REG_A0, REG_A7, REG_SP};

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;

/// Trait for extracting instruction fields from encoded instructions.
///
/// The compressed decoder uses the same trait for the quadrant and funct3
/// fields, whose positions differ from the 32-bit layout.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;

    /// Returns `true` if the low two bits mark a 16-bit encoding.
    fn is_compressed(&self) -> bool;

    /// Extracts the compressed quadrant (bits 0-1).
    fn quadrant(&self) -> u32;

    /// Extracts the compressed funct3 field (bits 13-15).
    fn c_funct3(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn is_compressed(&self) -> bool {
        self & COMPRESSED_INSTRUCTION_MASK != FULL_WIDTH_MARKER
    }

    #[inline(always)]
    fn quadrant(&self) -> u32 {
        self & COMPRESSED_INSTRUCTION_MASK
    }

    #[inline(always)]
    fn c_funct3(&self) -> u32 {
        (self >> 13) & FUNCT3_MASK
    }
}

/// Encoding format category of a decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Register-register.
    R,
    /// Register-immediate, loads, JALR, ECALL.
    I,
    /// Store.
    S,
    /// Conditional branch.
    Sb,
    /// Upper immediate.
    U,
    /// Unconditional jump.
    Uj,
    /// Compressed register.
    Cr,
    /// Compressed immediate.
    Ci,
    /// Compressed stack-relative store.
    Css,
    /// Compressed wide immediate.
    Ciw,
    /// Compressed load.
    Cl,
    /// Compressed store and register arithmetic.
    Cs,
    /// Compressed branch and shift/and-immediate.
    Cb,
    /// Compressed jump.
    Cj,
}

impl Format {
    /// Returns `true` for the 16-bit formats.
    pub const fn is_compressed(self) -> bool {
        !matches!(self, Self::R | Self::I | Self::S | Self::Sb | Self::U | Self::Uj)
    }
}

/// Operation kind of a decoded instruction.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    Add,
    Mul,
    Sub,
    Sll,
    Mulh,
    Slt,
    Xor,
    Div,
    Srl,
    Sra,
    Or,
    Rem,
    And,
    Lb,
    Lh,
    Lw,
    Ld,
    Addi,
    Slli,
    Slti,
    Xori,
    Srli,
    Srai,
    Ori,
    Andi,
    Addiw,
    Jalr,
    Ecall,
    Sb,
    Sh,
    Sw,
    Sd,
    Beq,
    Bne,
    Blt,
    Bge,
    Auipc,
    Lui,
    Jal,
    Li,
    Subw,
    Addw,
    J,
    Beqz,
    Bnez,
    Lwsp,
    Ldsp,
    Swsp,
    Sdsp,
    Mv,
    Bltu,
    Bgeu,
    Jr,
    Slliw,
    Srliw,
    Sraiw,
    Sllw,
    Srlw,
    Sraw,
    Lbu,
    Lhu,
    Mulw,
}

impl OpKind {
    /// Lower-case assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Mul => "mul",
            Self::Sub => "sub",
            Self::Sll => "sll",
            Self::Mulh => "mulh",
            Self::Slt => "slt",
            Self::Xor => "xor",
            Self::Div => "div",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Or => "or",
            Self::Rem => "rem",
            Self::And => "and",
            Self::Lb => "lb",
            Self::Lh => "lh",
            Self::Lw => "lw",
            Self::Ld => "ld",
            Self::Addi => "addi",
            Self::Slli => "slli",
            Self::Slti => "slti",
            Self::Xori => "xori",
            Self::Srli => "srli",
            Self::Srai => "srai",
            Self::Ori => "ori",
            Self::Andi => "andi",
            Self::Addiw => "addiw",
            Self::Jalr => "jalr",
            Self::Ecall => "ecall",
            Self::Sb => "sb",
            Self::Sh => "sh",
            Self::Sw => "sw",
            Self::Sd => "sd",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Blt => "blt",
            Self::Bge => "bge",
            Self::Auipc => "auipc",
            Self::Lui => "lui",
            Self::Jal => "jal",
            Self::Li => "li",
            Self::Subw => "subw",
            Self::Addw => "addw",
            Self::J => "j",
            Self::Beqz => "beqz",
            Self::Bnez => "bnez",
            Self::Lwsp => "lwsp",
            Self::Ldsp => "ldsp",
            Self::Swsp => "swsp",
            Self::Sdsp => "sdsp",
            Self::Mv => "mv",
            Self::Bltu => "bltu",
            Self::Bgeu => "bgeu",
            Self::Jr => "jr",
            Self::Slliw => "slliw",
            Self::Srliw => "srliw",
            Self::Sraiw => "sraiw",
            Self::Sllw => "sllw",
            Self::Srlw => "srlw",
            Self::Sraw => "sraw",
            Self::Lbu => "lbu",
            Self::Lhu => "lhu",
            Self::Mulw => "mulw",
        }
    }

    /// Returns `true` for every load, including the stack-relative forms.
    pub const fn is_load(self) -> bool {
        matches!(
            self,
            Self::Lb | Self::Lh | Self::Lw | Self::Ld | Self::Lbu | Self::Lhu | Self::Lwsp | Self::Ldsp
        )
    }

    /// Returns `true` for every store, including the stack-relative forms.
    pub const fn is_store(self) -> bool {
        matches!(
            self,
            Self::Sb | Self::Sh | Self::Sw | Self::Sd | Self::Swsp | Self::Sdsp
        )
    }

    /// Access width in bytes for loads and stores, `None` otherwise.
    pub const fn access_size(self) -> Option<usize> {
        match self {
            Self::Lb | Self::Lbu | Self::Sb => Some(1),
            Self::Lh | Self::Lhu | Self::Sh => Some(2),
            Self::Lw | Self::Lwsp | Self::Sw | Self::Swsp => Some(4),
            Self::Ld | Self::Ldsp | Self::Sd | Self::Sdsp => Some(8),
            _ => None,
        }
    }

    /// Returns `true` for conditional branches.
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Self::Beq
                | Self::Bne
                | Self::Blt
                | Self::Bge
                | Self::Bltu
                | Self::Bgeu
                | Self::Beqz
                | Self::Bnez
        )
    }

    /// Returns `true` for unconditional jumps.
    pub const fn is_jump(self) -> bool {
        matches!(self, Self::Jal | Self::Jalr | Self::J | Self::Jr)
    }

    /// Whether an instruction of this kind commits a register at write-back.
    ///
    /// `ecall` starts out as a non-writer; syscalls with a result set the flag at execute.
    pub const fn writes_register(self) -> bool {
        !(self.is_store() || self.is_branch() || matches!(self, Self::Ecall | Self::J | Self::Jr))
    }

    /// Returns `true` if the second operand comes from `rs2`.
    pub const fn reads_rs2(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Mul
                | Self::Sub
                | Self::Sll
                | Self::Mulh
                | Self::Slt
                | Self::Xor
                | Self::Div
                | Self::Srl
                | Self::Sra
                | Self::Or
                | Self::Rem
                | Self::And
                | Self::Subw
                | Self::Addw
                | Self::Sllw
                | Self::Srlw
                | Self::Sraw
                | Self::Mulw
                | Self::Mv
                | Self::Beq
                | Self::Bne
                | Self::Blt
                | Self::Bge
                | Self::Bltu
                | Self::Bgeu
        ) || self.is_store()
    }

    /// Returns `true` if the operation reads a base/first source register at all.
    pub const fn reads_rs1(self) -> bool {
        !matches!(
            self,
            Self::Lui | Self::Auipc | Self::Li | Self::Jal | Self::J | Self::Mv | Self::Ecall
        )
    }
}

/// Which forwarded operand supplies the first source value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseRole {
    /// The `rs1` field.
    Rs1,
    /// The destination register, read as a source by two-address compressed forms.
    Rd,
    /// The stack pointer, implicit in stack-relative compressed forms.
    Sp,
}

/// A decoded instruction in flight.
///
/// Created at fetch, populated at decode, given its deferred value at execute
/// (or memory for loads) and consumed at write-back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Raw code word (upper half zero for compressed encodings).
    pub raw: u32,
    /// Encoding format category.
    pub format: Format,
    /// Operation kind.
    pub op: OpKind,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Sign-extended (or, for upper-immediate forms, pre-shifted) immediate.
    pub imm: i64,
    /// Address the instruction was fetched from.
    pub pc: u64,
    /// Encoded length in bytes (2 or 4).
    pub len: u64,
    /// Whether write-back commits `wb_value` to `rd`.
    pub writes_reg: bool,
    /// Value committed at write-back.
    pub wb_value: u64,
    /// Effective address computed at execute for loads and stores.
    pub mem_addr: u64,
}

impl Instruction {
    /// Creates a record for `raw` with all operand fields zero.
    ///
    /// The encoded length follows from the low two bits of `raw`; the write flag
    /// follows from the operation kind.
    pub fn new(raw: u32, format: Format, op: OpKind) -> Self {
        Self {
            raw,
            format,
            op,
            rd: 0,
            rs1: 0,
            rs2: 0,
            imm: 0,
            pc: 0,
            len: if raw.is_compressed() {
                INSTRUCTION_SIZE_16
            } else {
                INSTRUCTION_SIZE_32
            },
            writes_reg: op.writes_register(),
            wb_value: 0,
            mem_addr: 0,
        }
    }

    /// Sets the destination register.
    pub const fn with_rd(mut self, rd: usize) -> Self {
        self.rd = rd;
        self
    }

    /// Sets the first source register.
    pub const fn with_rs1(mut self, rs1: usize) -> Self {
        self.rs1 = rs1;
        self
    }

    /// Sets the second source register.
    pub const fn with_rs2(mut self, rs2: usize) -> Self {
        self.rs2 = rs2;
        self
    }

    /// Sets the immediate.
    pub const fn with_imm(mut self, imm: i64) -> Self {
        self.imm = imm;
        self
    }

    /// Address of the next sequential instruction, used as the link value.
    pub const fn next_pc(&self) -> u64 {
        self.pc.wrapping_add(self.len)
    }

    /// Returns `true` if this is a 16-bit encoding.
    pub const fn is_compressed(&self) -> bool {
        self.len == INSTRUCTION_SIZE_16
    }

    /// Selects the operand role that provides the first source value.
    pub fn base_role(&self) -> BaseRole {
        match (self.format, self.op) {
            (_, OpKind::Lwsp | OpKind::Ldsp | OpKind::Swsp | OpKind::Sdsp) => BaseRole::Sp,
            (Format::Ciw, _) => BaseRole::Sp,
            (Format::Ci, OpKind::Addi) if self.rd == REG_SP => BaseRole::Sp,
            (Format::Ci, OpKind::Addi | OpKind::Addiw | OpKind::Slli) => BaseRole::Rd,
            (Format::Cb, OpKind::Srli | OpKind::Srai | OpKind::Andi) => BaseRole::Rd,
            (
                Format::Cs,
                OpKind::Sub | OpKind::Xor | OpKind::Or | OpKind::And | OpKind::Subw | OpKind::Addw,
            ) => BaseRole::Rd,
            (Format::Cr, OpKind::Add) => BaseRole::Rd,
            _ => BaseRole::Rs1,
        }
    }

    /// Register indices this instruction reads, used for hazard detection.
    pub fn source_registers(&self) -> Vec<usize> {
        let mut regs = Vec::with_capacity(3);
        if self.op == OpKind::Ecall {
            regs.extend([REG_A7, REG_A0]);
            return regs;
        }
        if self.op.reads_rs1() {
            regs.push(match self.base_role() {
                BaseRole::Rs1 => self.rs1,
                BaseRole::Rd => self.rd,
                BaseRole::Sp => REG_SP,
            });
        }
        if self.op.reads_rs2() {
            regs.push(self.rs2);
        }
        regs
    }
}
