//! RISC-V Instruction Decoder.
//!
//! This module turns a raw code word into a semantic [`Instruction`]. It performs:
//! 1. **Width classification:** The low two bits select the compressed or full-width decoder.
//! 2. **Table dispatch:** A structured match on (opcode, funct3, funct7) picks the operation kind.
//! 3. **Field extraction:** Small per-format helpers reassemble and sign-extend immediates
//!    (R, I, S, B, U, J).
//!
//! Any combination outside the table is a [`DecodeError`]; the pipeline treats it as fatal.

use crate::common::error::DecodeError;
use crate::isa::instruction::{Format, Instruction, InstructionBits, OpKind};
use crate::isa::rv64i::{funct3, funct7, opcodes};
use crate::isa::rvc;

/// Total width of a RISC-V instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Bit shift for extracting I-Type immediate field (bits 20-31).
const I_IMM_SHIFT: u32 = 20;

/// Total number of bits in S-Type immediate (12 bits).
const S_IMM_BITS: u32 = 12;

/// Total number of bits in B-Type immediate (13 bits, sign-extended).
const B_IMM_BITS: u32 = 13;

/// Bit mask for extracting U-Type immediate field (bits 12-31).
///
/// The immediate keeps its position in the high bits; it is not shifted down.
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Total number of bits in J-Type immediate (21 bits, sign-extended).
const J_IMM_BITS: u32 = 21;

/// Shift amount mask for RV64 shift-immediates (6 bits).
const SHAMT64_MASK: u32 = 0x3F;

/// Shift amount mask for 32-bit shift-immediates (5 bits).
const SHAMT32_MASK: u32 = 0x1F;

/// Encoded bits 7-31 of ECALL (all zero).
const ECALL_UPPER: u32 = 0;

/// Decodes a 16- or 32-bit code word.
///
/// Compressed encodings are recognised by their low two bits; only the low
/// halfword of `code` is consulted for them.
///
/// # Arguments
///
/// * `code` - Raw code word as fetched.
///
/// # Returns
///
/// The decoded instruction with `pc` left at zero, or the reason decoding failed.
pub fn decode(code: u32) -> Result<Instruction, DecodeError> {
    if code.is_compressed() {
        rvc::decode_compressed(code & 0xFFFF)
    } else {
        decode_full(code)
    }
}

/// Decodes a full-width (32-bit) instruction.
fn decode_full(inst: u32) -> Result<Instruction, DecodeError> {
    let opcode = inst.opcode();
    let f3 = inst.funct3();
    let f7 = inst.funct7();
    let unknown = || DecodeError::UnknownFunct {
        raw: inst,
        opcode,
        funct3: f3,
        funct7: f7,
    };

    match opcode {
        opcodes::OP_REG => {
            let op = match (f3, f7) {
                (funct3::ADD_SUB, funct7::DEFAULT) => OpKind::Add,
                (funct3::ADD_SUB, funct7::MULDIV) => OpKind::Mul,
                (funct3::ADD_SUB, funct7::SUB) => OpKind::Sub,
                (funct3::SLL, funct7::DEFAULT) => OpKind::Sll,
                (funct3::SLL, funct7::MULDIV) => OpKind::Mulh,
                (funct3::SLT, funct7::DEFAULT) => OpKind::Slt,
                (funct3::XOR, funct7::DEFAULT) => OpKind::Xor,
                (funct3::XOR, funct7::MULDIV) => OpKind::Div,
                (funct3::SRL_SRA, funct7::DEFAULT) => OpKind::Srl,
                (funct3::SRL_SRA, funct7::SRA) => OpKind::Sra,
                (funct3::OR, funct7::DEFAULT) => OpKind::Or,
                (funct3::OR, funct7::MULDIV) => OpKind::Rem,
                (funct3::AND, funct7::DEFAULT) => OpKind::And,
                _ => return Err(unknown()),
            };
            Ok(r_type(inst, op))
        }

        opcodes::OP_REG_32 => {
            let op = match (f3, f7) {
                (funct3::ADD_SUB, funct7::DEFAULT) => OpKind::Addw,
                (funct3::ADD_SUB, funct7::MULDIV) => OpKind::Mulw,
                (funct3::ADD_SUB, funct7::SUB) => OpKind::Subw,
                (funct3::SLL, funct7::DEFAULT) => OpKind::Sllw,
                (funct3::SRL_SRA, funct7::DEFAULT) => OpKind::Srlw,
                (funct3::SRL_SRA, funct7::SRA) => OpKind::Sraw,
                _ => return Err(unknown()),
            };
            Ok(r_type(inst, op))
        }

        opcodes::OP_LOAD => {
            let op = match f3 {
                funct3::LB => OpKind::Lb,
                funct3::LH => OpKind::Lh,
                funct3::LW => OpKind::Lw,
                funct3::LD => OpKind::Ld,
                funct3::LBU => OpKind::Lbu,
                funct3::LHU => OpKind::Lhu,
                _ => return Err(unknown()),
            };
            Ok(i_type(inst, op, decode_i_type_imm(inst)))
        }

        opcodes::OP_IMM => {
            let funct6 = inst >> 26;
            let shamt = i64::from((inst >> I_IMM_SHIFT) & SHAMT64_MASK);
            let (op, imm) = match f3 {
                funct3::ADD_SUB => (OpKind::Addi, decode_i_type_imm(inst)),
                funct3::SLL if funct6 == funct7::FUNCT6_DEFAULT => (OpKind::Slli, shamt),
                funct3::SLT => (OpKind::Slti, decode_i_type_imm(inst)),
                funct3::XOR => (OpKind::Xori, decode_i_type_imm(inst)),
                funct3::SRL_SRA if funct6 == funct7::FUNCT6_DEFAULT => (OpKind::Srli, shamt),
                funct3::SRL_SRA if funct6 == funct7::FUNCT6_SRA => (OpKind::Srai, shamt),
                funct3::OR => (OpKind::Ori, decode_i_type_imm(inst)),
                funct3::AND => (OpKind::Andi, decode_i_type_imm(inst)),
                _ => return Err(unknown()),
            };
            Ok(i_type(inst, op, imm))
        }

        opcodes::OP_IMM_32 => {
            let shamt = i64::from((inst >> I_IMM_SHIFT) & SHAMT32_MASK);
            let (op, imm) = match (f3, f7) {
                (funct3::ADD_SUB, _) => (OpKind::Addiw, decode_i_type_imm(inst)),
                (funct3::SLL, funct7::DEFAULT) => (OpKind::Slliw, shamt),
                (funct3::SRL_SRA, funct7::DEFAULT) => (OpKind::Srliw, shamt),
                (funct3::SRL_SRA, funct7::SRA) => (OpKind::Sraiw, shamt),
                _ => return Err(unknown()),
            };
            Ok(i_type(inst, op, imm))
        }

        opcodes::OP_JALR if f3 == funct3::ZERO => {
            Ok(i_type(inst, OpKind::Jalr, decode_i_type_imm(inst)))
        }

        opcodes::OP_SYSTEM if inst >> 7 == ECALL_UPPER => {
            Ok(Instruction::new(inst, Format::I, OpKind::Ecall))
        }

        opcodes::OP_STORE => {
            let op = match f3 {
                funct3::SB => OpKind::Sb,
                funct3::SH => OpKind::Sh,
                funct3::SW => OpKind::Sw,
                funct3::SD => OpKind::Sd,
                _ => return Err(unknown()),
            };
            Ok(Instruction::new(inst, Format::S, op)
                .with_rs1(inst.rs1())
                .with_rs2(inst.rs2())
                .with_imm(decode_s_type_imm(inst)))
        }

        opcodes::OP_BRANCH => {
            let op = match f3 {
                funct3::BEQ => OpKind::Beq,
                funct3::BNE => OpKind::Bne,
                funct3::BLT => OpKind::Blt,
                funct3::BGE => OpKind::Bge,
                funct3::BLTU => OpKind::Bltu,
                funct3::BGEU => OpKind::Bgeu,
                _ => return Err(unknown()),
            };
            Ok(Instruction::new(inst, Format::Sb, op)
                .with_rs1(inst.rs1())
                .with_rs2(inst.rs2())
                .with_imm(decode_b_type_imm(inst)))
        }

        opcodes::OP_LUI | opcodes::OP_AUIPC => {
            let op = if opcode == opcodes::OP_LUI {
                OpKind::Lui
            } else {
                OpKind::Auipc
            };
            Ok(Instruction::new(inst, Format::U, op)
                .with_rd(inst.rd())
                .with_imm(decode_u_type_imm(inst)))
        }

        opcodes::OP_JAL => Ok(Instruction::new(inst, Format::Uj, OpKind::Jal)
            .with_rd(inst.rd())
            .with_imm(decode_j_type_imm(inst))),

        opcodes::OP_JALR | opcodes::OP_SYSTEM => Err(unknown()),

        _ => Err(DecodeError::UnknownOpcode { raw: inst, opcode }),
    }
}

/// Builds an R-type record.
fn r_type(inst: u32, op: OpKind) -> Instruction {
    Instruction::new(inst, Format::R, op)
        .with_rd(inst.rd())
        .with_rs1(inst.rs1())
        .with_rs2(inst.rs2())
}

/// Builds an I-type record with an already extracted immediate.
fn i_type(inst: u32, op: OpKind, imm: i64) -> Instruction {
    Instruction::new(inst, Format::I, op)
        .with_rd(inst.rd())
        .with_rs1(inst.rs1())
        .with_imm(imm)
}

/// Decodes the immediate value for I-Type instructions.
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`
fn decode_i_type_imm(inst: u32) -> i64 {
    ((inst as i32) >> I_IMM_SHIFT) as i64
}

/// Decodes the immediate value for S-Type instructions.
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
fn decode_s_type_imm(inst: u32) -> i64 {
    let low = (inst >> 7) & 0x1F;
    let high = (inst >> 25) & 0x7F;
    sign_extend((high << 5) | low, S_IMM_BITS)
}

/// Decodes the immediate value for B-Type instructions.
///
/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`
fn decode_b_type_imm(inst: u32) -> i64 {
    let bit_11 = (inst >> 7) & 0x1;
    let bits_4_1 = (inst >> 8) & 0xF;
    let bits_10_5 = (inst >> 25) & 0x3F;
    let bit_12 = (inst >> 31) & 0x1;

    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, B_IMM_BITS)
}

/// Decodes the immediate value for U-Type instructions.
///
/// U-Type format: `imm[31:12] | rd | opcode`
fn decode_u_type_imm(inst: u32) -> i64 {
    ((inst & U_IMM_MASK) as i32) as i64
}

/// Decodes the immediate value for J-Type instructions.
///
/// J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`
fn decode_j_type_imm(inst: u32) -> i64 {
    let bits_19_12 = (inst >> 12) & 0xFF;
    let bit_11 = (inst >> 20) & 0x1;
    let bits_10_1 = (inst >> 21) & 0x3FF;
    let bit_20 = (inst >> 31) & 0x1;

    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined, J_IMM_BITS)
}

/// Sign extends a value of `bits` width to a 64-bit signed integer.
///
/// # Arguments
///
/// * `val` - The value to extend.
/// * `bits` - The number of valid bits in `val`.
pub(crate) fn sign_extend(val: u32, bits: u32) -> i64 {
    let shift = INSTRUCTION_WIDTH - bits;
    ((val as i32) << shift >> shift) as i64
}
