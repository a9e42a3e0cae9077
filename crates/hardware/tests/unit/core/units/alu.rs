//! ALU Unit Tests.
//!
//! Covers the wrapping and sign-extension rules of every operation, division
//! corner cases, shift amount masking and branch conditions.

use pipesim_core::core::units::alu::{Alu, AluOp};
use pipesim_core::isa::instruction::OpKind;
use proptest::prelude::*;
use rstest::rstest;

const NEG_ONE: u64 = u64::MAX;

// ══════════════════════════════════════════════════════════
// 1. Arithmetic
// ══════════════════════════════════════════════════════════

#[test]
fn add_wraps() {
    assert_eq!(Alu::execute(AluOp::Add, u64::MAX, 1, false), 0);
}

#[test]
fn sub_wraps() {
    assert_eq!(Alu::execute(AluOp::Sub, 0, 1, false), NEG_ONE);
}

#[test]
fn word_ops_sign_extend_bit_31() {
    assert_eq!(
        Alu::execute(AluOp::Add, 0x7FFF_FFFF, 1, true),
        0xFFFF_FFFF_8000_0000
    );
    assert_eq!(Alu::execute(AluOp::Sub, 0, 1, true), NEG_ONE);
    // Upper input bits are ignored.
    assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF_0000_0005, 3, true), 8);
}

#[test]
fn mul_keeps_the_low_half() {
    assert_eq!(Alu::execute(AluOp::Mul, 6, 7, false), 42);
    assert_eq!(Alu::execute(AluOp::Mul, 1 << 63, 2, false), 0);
}

#[test]
fn mulw_sign_extends() {
    assert_eq!(
        Alu::execute(AluOp::Mul, 0x1_0000, 0x8000, true),
        0xFFFF_FFFF_8000_0000
    );
}

#[test]
fn mulh_returns_the_signed_high_half() {
    assert_eq!(Alu::execute(AluOp::Mulh, 1 << 62, 4, false), 1);
    assert_eq!(Alu::execute(AluOp::Mulh, NEG_ONE, NEG_ONE, false), 0);
    assert_eq!(Alu::execute(AluOp::Mulh, NEG_ONE, 2, false), NEG_ONE);
}

#[test]
fn division_by_zero_returns_all_ones() {
    assert_eq!(Alu::execute(AluOp::Div, 42, 0, false), NEG_ONE);
}

#[test]
fn remainder_by_zero_returns_the_dividend() {
    assert_eq!(Alu::execute(AluOp::Rem, 42, 0, false), 42);
}

#[test]
fn signed_overflow_division() {
    let min = i64::MIN as u64;
    assert_eq!(Alu::execute(AluOp::Div, min, NEG_ONE, false), min);
    assert_eq!(Alu::execute(AluOp::Rem, min, NEG_ONE, false), 0);
}

#[test]
fn division_truncates_toward_zero() {
    assert_eq!(Alu::execute(AluOp::Div, -7i64 as u64, 2, false), -3i64 as u64);
    assert_eq!(Alu::execute(AluOp::Rem, -7i64 as u64, 2, false), -1i64 as u64);
}

// ══════════════════════════════════════════════════════════
// 2. Logic and comparison
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(AluOp::Or, 0b1100, 0b1010, 0b1110)]
#[case(AluOp::And, 0b1100, 0b1010, 0b1000)]
#[case(AluOp::Xor, 0b1100, 0b1010, 0b0110)]
#[case(AluOp::Slt, -1i64 as u64, 0, 1)]
#[case(AluOp::Slt, 0, -1i64 as u64, 0)]
#[case(AluOp::Slt, 5, 5, 0)]
fn logic(#[case] op: AluOp, #[case] a: u64, #[case] b: u64, #[case] expected: u64) {
    assert_eq!(Alu::execute(op, a, b, false), expected);
}

// ══════════════════════════════════════════════════════════
// 3. Shifts
// ══════════════════════════════════════════════════════════

#[test]
fn shift_amount_is_masked_to_six_bits() {
    assert_eq!(Alu::execute(AluOp::Sll, 1, 64, false), 1);
    assert_eq!(Alu::execute(AluOp::Sll, 1, 65, false), 2);
}

#[test]
fn word_shift_amount_is_masked_to_five_bits() {
    assert_eq!(Alu::execute(AluOp::Sll, 1, 32, true), 1);
    assert_eq!(Alu::execute(AluOp::Sll, 1, 31, true), 0xFFFF_FFFF_8000_0000);
}

#[test]
fn arithmetic_shift_keeps_the_sign() {
    assert_eq!(Alu::execute(AluOp::Sra, 1 << 63, 63, false), NEG_ONE);
    assert_eq!(Alu::execute(AluOp::Srl, 1 << 63, 63, false), 1);
    assert_eq!(Alu::execute(AluOp::Sra, 0x8000_0000, 4, true), 0xFFFF_FFFF_F800_0000);
    assert_eq!(Alu::execute(AluOp::Srl, 0x8000_0000, 4, true), 0x0800_0000);
}

// ══════════════════════════════════════════════════════════
// 4. Operation mapping and branches
// ══════════════════════════════════════════════════════════

#[test]
fn from_kind_maps_word_variants() {
    assert_eq!(AluOp::from_kind(OpKind::Addiw), Some((AluOp::Add, true)));
    assert_eq!(AluOp::from_kind(OpKind::Sraw), Some((AluOp::Sra, true)));
    assert_eq!(AluOp::from_kind(OpKind::Xori), Some((AluOp::Xor, false)));
    assert_eq!(AluOp::from_kind(OpKind::Lw), None);
    assert_eq!(AluOp::from_kind(OpKind::Jal), None);
}

#[rstest]
#[case(OpKind::Beq, 3, 3, true)]
#[case(OpKind::Bne, 3, 3, false)]
#[case(OpKind::Blt, -1i64 as u64, 0, true)]
#[case(OpKind::Bltu, -1i64 as u64, 0, false)]
#[case(OpKind::Bge, 0, -1i64 as u64, true)]
#[case(OpKind::Bgeu, 0, -1i64 as u64, false)]
#[case(OpKind::Beqz, 0, 99, true)]
#[case(OpKind::Bnez, 0, 99, false)]
#[case(OpKind::Add, 0, 0, false)]
fn branch_conditions(#[case] kind: OpKind, #[case] a: u64, #[case] b: u64, #[case] taken: bool) {
    assert_eq!(Alu::branch_taken(kind, a, b), taken);
}

proptest! {
    #[test]
    fn word_results_are_sign_extended(a: u64, b: u64) {
        for op in [AluOp::Add, AluOp::Sub, AluOp::Mul, AluOp::Sll, AluOp::Srl, AluOp::Sra] {
            let r = Alu::execute(op, a, b, true);
            prop_assert_eq!(r, r as u32 as i32 as i64 as u64);
        }
    }

    #[test]
    fn add_then_sub_is_identity(a: u64, b: u64) {
        let sum = Alu::execute(AluOp::Add, a, b, false);
        prop_assert_eq!(Alu::execute(AluOp::Sub, sum, b, false), a);
    }
}
