//! RISC-V Compressed Extension (C).
//!
//! Decodes the supported 16-bit subset directly into semantic instruction records.
//! Field positions differ per format; each immediate is reassembled from its
//! scattered bit slices and then sign- or zero-extended as the encoding requires.
//!
//! # Structure
//!
//! - `constants`: Quadrant and funct3 definitions for compressed instructions.

/// Compressed instruction quadrant and funct3 constants.
pub mod constants;

use self::constants::{QUADRANT_0, QUADRANT_1, QUADRANT_2, q0, q1, q2};
use crate::common::error::DecodeError;
use crate::isa::abi::{REG_RA, REG_SP, REG_ZERO};
use crate::isa::decode::sign_extend;
use crate::isa::instruction::{Format, Instruction, InstructionBits, OpKind};

/// Offset added to a 3-bit register field to reach x8-x15.
const PRIME_REG_BASE: usize = 8;

/// Extracts bit `n` of `c`.
#[inline(always)]
fn bit(c: u32, n: u32) -> u32 {
    (c >> n) & 1
}

/// Extracts `width` bits of `c` starting at `lo`.
#[inline(always)]
fn bits(c: u32, lo: u32, width: u32) -> u32 {
    (c >> lo) & ((1 << width) - 1)
}

/// Full 5-bit `rd`/`rs1` field (bits 7-11).
#[inline(always)]
fn rd_full(c: u32) -> usize {
    bits(c, 7, 5) as usize
}

/// Full 5-bit `rs2` field (bits 2-6).
#[inline(always)]
fn rs2_full(c: u32) -> usize {
    bits(c, 2, 5) as usize
}

/// Compact register in bits 7-9 (`rs1'`/`rd'`).
#[inline(always)]
fn rs1_prime(c: u32) -> usize {
    bits(c, 7, 3) as usize + PRIME_REG_BASE
}

/// Compact register in bits 2-4 (`rs2'`/`rd'`).
#[inline(always)]
fn rs2_prime(c: u32) -> usize {
    bits(c, 2, 3) as usize + PRIME_REG_BASE
}

/// 6-bit CI immediate: `imm[5] = bit 12`, `imm[4:0] = bits 6-2`.
fn ci_imm6(c: u32) -> u32 {
    (bit(c, 12) << 5) | bits(c, 2, 5)
}

/// Word-scaled CL/CS offset (C.LW, C.SW).
fn clw_offset(c: u32) -> i64 {
    i64::from((bit(c, 6) << 2) | (bits(c, 10, 3) << 3) | (bit(c, 5) << 6))
}

/// Doubleword-scaled CL/CS offset (C.LD, C.SD).
fn cld_offset(c: u32) -> i64 {
    i64::from((bits(c, 10, 3) << 3) | (bits(c, 5, 2) << 6))
}

/// C.J target offset, 12-bit signed.
fn cj_offset(c: u32) -> i64 {
    let v = (bits(c, 3, 3) << 1)
        | (bit(c, 11) << 4)
        | (bit(c, 2) << 5)
        | (bit(c, 7) << 6)
        | (bit(c, 6) << 7)
        | (bits(c, 9, 2) << 8)
        | (bit(c, 8) << 10)
        | (bit(c, 12) << 11);
    sign_extend(v, 12)
}

/// C.BEQZ/C.BNEZ offset, 9-bit signed.
fn cb_offset(c: u32) -> i64 {
    let v = (bits(c, 3, 2) << 1)
        | (bits(c, 10, 2) << 3)
        | (bit(c, 2) << 5)
        | (bits(c, 5, 2) << 6)
        | (bit(c, 12) << 8);
    sign_extend(v, 9)
}

/// Decodes a 16-bit compressed instruction.
///
/// # Arguments
///
/// * `c` - The encoding in the low halfword; the upper half must be zero.
///
/// # Returns
///
/// The semantic record, or [`DecodeError::UnknownCompressed`] for reserved,
/// floating-point and otherwise unsupported encodings.
pub fn decode_compressed(c: u32) -> Result<Instruction, DecodeError> {
    let quadrant = c.quadrant();
    let f3 = c.c_funct3();
    let unknown = || DecodeError::UnknownCompressed {
        raw: c,
        quadrant,
        funct3: f3,
    };

    match (quadrant, f3) {
        (QUADRANT_0, q0::C_ADDI4SPN) => {
            let imm = (bit(c, 6) << 2)
                | (bit(c, 5) << 3)
                | (bits(c, 11, 2) << 4)
                | (bits(c, 7, 4) << 6);
            if imm == 0 {
                return Err(unknown());
            }
            Ok(Instruction::new(c, Format::Ciw, OpKind::Addi)
                .with_rd(rs2_prime(c))
                .with_rs1(REG_SP)
                .with_imm(i64::from(imm)))
        }
        (QUADRANT_0, q0::C_LW) => Ok(Instruction::new(c, Format::Cl, OpKind::Lw)
            .with_rd(rs2_prime(c))
            .with_rs1(rs1_prime(c))
            .with_imm(clw_offset(c))),
        (QUADRANT_0, q0::C_LD) => Ok(Instruction::new(c, Format::Cl, OpKind::Ld)
            .with_rd(rs2_prime(c))
            .with_rs1(rs1_prime(c))
            .with_imm(cld_offset(c))),
        (QUADRANT_0, q0::C_SW) => Ok(Instruction::new(c, Format::Cs, OpKind::Sw)
            .with_rs1(rs1_prime(c))
            .with_rs2(rs2_prime(c))
            .with_imm(clw_offset(c))),
        (QUADRANT_0, q0::C_SD) => Ok(Instruction::new(c, Format::Cs, OpKind::Sd)
            .with_rs1(rs1_prime(c))
            .with_rs2(rs2_prime(c))
            .with_imm(cld_offset(c))),

        (QUADRANT_1, q1::C_ADDI) => {
            let rd = rd_full(c);
            Ok(Instruction::new(c, Format::Ci, OpKind::Addi)
                .with_rd(rd)
                .with_rs1(rd)
                .with_imm(sign_extend(ci_imm6(c), 6)))
        }
        (QUADRANT_1, q1::C_ADDIW) => {
            let rd = rd_full(c);
            if rd == REG_ZERO {
                return Err(unknown());
            }
            Ok(Instruction::new(c, Format::Ci, OpKind::Addiw)
                .with_rd(rd)
                .with_rs1(rd)
                .with_imm(sign_extend(ci_imm6(c), 6)))
        }
        (QUADRANT_1, q1::C_LI) => Ok(Instruction::new(c, Format::Ci, OpKind::Li)
            .with_rd(rd_full(c))
            .with_imm(sign_extend(ci_imm6(c), 6))),
        (QUADRANT_1, q1::C_LUI_ADDI16SP) => {
            let rd = rd_full(c);
            if rd == REG_SP {
                let v = (bit(c, 6) << 4)
                    | (bit(c, 2) << 5)
                    | (bit(c, 5) << 6)
                    | (bits(c, 3, 2) << 7)
                    | (bit(c, 12) << 9);
                if v == 0 {
                    return Err(unknown());
                }
                Ok(Instruction::new(c, Format::Ci, OpKind::Addi)
                    .with_rd(REG_SP)
                    .with_rs1(REG_SP)
                    .with_imm(sign_extend(v, 10)))
            } else {
                let v = (bits(c, 2, 5) << 12) | (bit(c, 12) << 17);
                if v == 0 {
                    return Err(unknown());
                }
                Ok(Instruction::new(c, Format::Ci, OpKind::Lui)
                    .with_rd(rd)
                    .with_imm(sign_extend(v, 18)))
            }
        }
        (QUADRANT_1, q1::C_MISC_ALU) => decode_misc_alu(c).ok_or_else(unknown),
        (QUADRANT_1, q1::C_J) => Ok(Instruction::new(c, Format::Cj, OpKind::J)
            .with_rd(REG_ZERO)
            .with_imm(cj_offset(c))),
        (QUADRANT_1, q1::C_BEQZ | q1::C_BNEZ) => {
            let op = if f3 == q1::C_BEQZ {
                OpKind::Beqz
            } else {
                OpKind::Bnez
            };
            Ok(Instruction::new(c, Format::Cb, op)
                .with_rs1(rs1_prime(c))
                .with_rs2(REG_ZERO)
                .with_imm(cb_offset(c)))
        }

        (QUADRANT_2, q2::C_SLLI) => {
            let rd = rd_full(c);
            Ok(Instruction::new(c, Format::Ci, OpKind::Slli)
                .with_rd(rd)
                .with_rs1(rd)
                .with_imm(i64::from(ci_imm6(c))))
        }
        (QUADRANT_2, q2::C_LWSP) => {
            let rd = rd_full(c);
            if rd == REG_ZERO {
                return Err(unknown());
            }
            let imm = (bits(c, 4, 3) << 2) | (bit(c, 12) << 5) | (bits(c, 2, 2) << 6);
            Ok(Instruction::new(c, Format::Ci, OpKind::Lwsp)
                .with_rd(rd)
                .with_rs1(REG_SP)
                .with_imm(i64::from(imm)))
        }
        (QUADRANT_2, q2::C_LDSP) => {
            let rd = rd_full(c);
            if rd == REG_ZERO {
                return Err(unknown());
            }
            let imm = (bits(c, 5, 2) << 3) | (bit(c, 12) << 5) | (bits(c, 2, 3) << 6);
            Ok(Instruction::new(c, Format::Ci, OpKind::Ldsp)
                .with_rd(rd)
                .with_rs1(REG_SP)
                .with_imm(i64::from(imm)))
        }
        (QUADRANT_2, q2::C_MISC_ALU) => {
            let rs1 = rd_full(c);
            let rs2 = rs2_full(c);
            match (bit(c, 12), rs2) {
                (0, 0) if rs1 != REG_ZERO => Ok(Instruction::new(c, Format::Cr, OpKind::Jr)
                    .with_rs1(rs1)),
                (0, _) if rs2 != 0 => Ok(Instruction::new(c, Format::Cr, OpKind::Mv)
                    .with_rd(rs1)
                    .with_rs2(rs2)),
                (1, 0) if rs1 != REG_ZERO => Ok(Instruction::new(c, Format::Cr, OpKind::Jalr)
                    .with_rd(REG_RA)
                    .with_rs1(rs1)),
                (1, _) if rs2 != 0 => Ok(Instruction::new(c, Format::Cr, OpKind::Add)
                    .with_rd(rs1)
                    .with_rs1(rs1)
                    .with_rs2(rs2)),
                _ => Err(unknown()),
            }
        }
        (QUADRANT_2, q2::C_SWSP) => {
            let imm = (bits(c, 9, 4) << 2) | (bits(c, 7, 2) << 6);
            Ok(Instruction::new(c, Format::Css, OpKind::Swsp)
                .with_rs1(REG_SP)
                .with_rs2(rs2_full(c))
                .with_imm(i64::from(imm)))
        }
        (QUADRANT_2, q2::C_SDSP) => {
            let imm = (bits(c, 10, 3) << 3) | (bits(c, 7, 3) << 6);
            Ok(Instruction::new(c, Format::Css, OpKind::Sdsp)
                .with_rs1(REG_SP)
                .with_rs2(rs2_full(c))
                .with_imm(i64::from(imm)))
        }

        _ => Err(unknown()),
    }
}

/// Decodes the quadrant-1 funct3=4 group (shifts, ANDI and register arithmetic).
fn decode_misc_alu(c: u32) -> Option<Instruction> {
    let rd = rs1_prime(c);
    let uimm = i64::from(ci_imm6(c));
    let inst = match bits(c, 10, 2) {
        0b00 => Instruction::new(c, Format::Cb, OpKind::Srli).with_imm(uimm),
        0b01 => Instruction::new(c, Format::Cb, OpKind::Srai).with_imm(uimm),
        0b10 => Instruction::new(c, Format::Cb, OpKind::Andi)
            .with_imm(sign_extend(ci_imm6(c), 6)),
        _ => {
            let op = match (bit(c, 12), bits(c, 5, 2)) {
                (0, 0b00) => OpKind::Sub,
                (0, 0b01) => OpKind::Xor,
                (0, 0b10) => OpKind::Or,
                (0, 0b11) => OpKind::And,
                (1, 0b00) => OpKind::Subw,
                (1, 0b01) => OpKind::Addw,
                _ => return None,
            };
            Instruction::new(c, Format::Cs, op).with_rs2(rs2_prime(c))
        }
    };
    Some(inst.with_rd(rd).with_rs1(rd))
}
