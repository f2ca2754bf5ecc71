//! # ALU Tests
//!
//! Signed/unsigned comparison, shift, and multiply/divide semantics.

use rv32sim_core::core::alu::{branch_taken, immediate_op, register_op, AluError};

const F7_BASE: u32 = 0x00;
const F7_ALT: u32 = 0x20;
const F7_M: u32 = 0x01;

#[test]
fn test_add_wraps() {
    assert_eq!(register_op(0x0, F7_BASE, 0xFFFF_FFFF, 1).unwrap(), 0);
    assert_eq!(
        register_op(0x0, F7_BASE, 0x7FFF_FFFF, 1).unwrap(),
        0x8000_0000
    );
}

#[test]
fn test_sub_wraps() {
    assert_eq!(register_op(0x0, F7_ALT, 0, 1).unwrap(), 0xFFFF_FFFF);
    assert_eq!(register_op(0x0, F7_ALT, 7, 5).unwrap(), 2);
}

#[test]
fn test_slt_is_signed_sltu_is_unsigned() {
    // x = -1 signed, but the largest unsigned value.
    assert_eq!(register_op(0x2, F7_BASE, 0xFFFF_FFFF, 1).unwrap(), 1);
    assert_eq!(register_op(0x3, F7_BASE, 0xFFFF_FFFF, 1).unwrap(), 0);
}

#[test]
fn test_shifts_use_low_five_bits() {
    assert_eq!(register_op(0x1, F7_BASE, 1, 33).unwrap(), 2);
    assert_eq!(register_op(0x5, F7_BASE, 4, 0x21).unwrap(), 2);
}

#[test]
fn test_srl_vs_sra() {
    assert_eq!(
        register_op(0x5, F7_BASE, 0x8000_0000, 1).unwrap(),
        0x4000_0000
    );
    assert_eq!(
        register_op(0x5, F7_ALT, 0x8000_0000, 1).unwrap(),
        0xC000_0000
    );
}

#[test]
fn test_bitwise_ops() {
    assert_eq!(register_op(0x4, F7_BASE, 0b1100, 0b1010).unwrap(), 0b0110);
    assert_eq!(register_op(0x6, F7_BASE, 0b1100, 0b1010).unwrap(), 0b1110);
    assert_eq!(register_op(0x7, F7_BASE, 0b1100, 0b1010).unwrap(), 0b1000);
}

#[test]
fn test_mul_low_word() {
    assert_eq!(register_op(0x0, F7_M, 7, 6).unwrap(), 42);
    // 0x10000 * 0x10000 overflows into the high word; MUL keeps the low 32.
    assert_eq!(register_op(0x0, F7_M, 0x1_0000, 0x1_0000).unwrap(), 0);
}

#[test]
fn test_mulh_signed_signed() {
    // -1 * -1 = 1 -> high word 0.
    assert_eq!(
        register_op(0x1, F7_M, 0xFFFF_FFFF, 0xFFFF_FFFF).unwrap(),
        0
    );
    // 0x80000000 * 0x80000000 = 2^62 -> high word 0x40000000.
    assert_eq!(
        register_op(0x1, F7_M, 0x8000_0000, 0x8000_0000).unwrap(),
        0x4000_0000
    );
}

#[test]
fn test_mulhsu_signed_unsigned() {
    // -1 (signed) * 0xFFFFFFFF (unsigned) = -(2^32 - 1) -> high word -1.
    assert_eq!(
        register_op(0x2, F7_M, 0xFFFF_FFFF, 0xFFFF_FFFF).unwrap(),
        0xFFFF_FFFF
    );
}

#[test]
fn test_mulhu_unsigned_unsigned() {
    assert_eq!(
        register_op(0x3, F7_M, 0xFFFF_FFFF, 0xFFFF_FFFF).unwrap(),
        0xFFFF_FFFE
    );
}

#[test]
fn test_div_truncates_toward_zero() {
    assert_eq!(register_op(0x4, F7_M, 7, 2).unwrap(), 3);
    // -7 / 2 = -3 (truncation, not flooring).
    assert_eq!(
        register_op(0x4, F7_M, (-7i32) as u32, 2).unwrap(),
        (-3i32) as u32
    );
}

#[test]
fn test_div_min_by_minus_one_wraps() {
    assert_eq!(
        register_op(0x4, F7_M, 0x8000_0000, 0xFFFF_FFFF).unwrap(),
        0x8000_0000
    );
    assert_eq!(
        register_op(0x6, F7_M, 0x8000_0000, 0xFFFF_FFFF).unwrap(),
        0
    );
}

#[test]
fn test_rem_signs() {
    assert_eq!(register_op(0x6, F7_M, 7, 2).unwrap(), 1);
    assert_eq!(
        register_op(0x6, F7_M, (-7i32) as u32, 2).unwrap(),
        (-1i32) as u32
    );
    assert_eq!(register_op(0x7, F7_M, 7, 2).unwrap(), 1);
}

#[test]
fn test_divide_by_zero_faults() {
    for f3 in [0x4, 0x5, 0x6, 0x7] {
        assert_eq!(register_op(f3, F7_M, 1, 0), Err(AluError::DivideByZero));
    }
}

#[test]
fn test_unknown_funct7_plane_is_unsupported() {
    assert_eq!(register_op(0x0, 0x15, 1, 2), Err(AluError::Unsupported));
    // SUB plane only pairs with funct3 0 and 5.
    assert_eq!(register_op(0x4, F7_ALT, 1, 2), Err(AluError::Unsupported));
}

#[test]
fn test_immediate_ops() {
    assert_eq!(immediate_op(0x0, 5, -3).unwrap(), 2);
    assert_eq!(immediate_op(0x2, 0xFFFF_FFFF, 1).unwrap(), 1); // slti: -1 < 1
    assert_eq!(immediate_op(0x3, 0xFFFF_FFFF, 1).unwrap(), 0); // sltiu
    assert_eq!(immediate_op(0x4, 0b1100, 0b1010).unwrap(), 0b0110);
    assert_eq!(immediate_op(0x6, 0b1100, 0b1010).unwrap(), 0b1110);
    assert_eq!(immediate_op(0x7, 0b1100, 0b1010).unwrap(), 0b1000);
}

#[test]
fn test_sltiu_compares_sign_extended_imm_as_unsigned() {
    // imm -1 sign-extends to 0xFFFFFFFF before the unsigned compare.
    assert_eq!(immediate_op(0x3, 5, -1).unwrap(), 1);
}

#[test]
fn test_shift_immediates() {
    assert_eq!(immediate_op(0x1, 1, 4).unwrap(), 16);
    assert_eq!(immediate_op(0x5, 0x8000_0000, 1).unwrap(), 0x4000_0000);
    // SRAI: bit 10 of the immediate (instruction bit 30) selects the
    // arithmetic shift.
    assert_eq!(
        immediate_op(0x5, 0x8000_0000, 0x400 | 1).unwrap(),
        0xC000_0000
    );
}

#[test]
fn test_shift_immediate_bad_plane_is_unsupported() {
    assert_eq!(immediate_op(0x1, 1, 0x400 | 4), Err(AluError::Unsupported));
    assert_eq!(immediate_op(0x5, 1, 0x200 | 4), Err(AluError::Unsupported));
}

#[test]
fn test_branch_predicates() {
    assert!(branch_taken(0x0, 3, 3).unwrap()); // beq
    assert!(!branch_taken(0x0, 3, 4).unwrap());
    assert!(branch_taken(0x1, 3, 4).unwrap()); // bne
    assert!(branch_taken(0x4, 0xFFFF_FFFF, 0).unwrap()); // blt: -1 < 0
    assert!(!branch_taken(0x6, 0xFFFF_FFFF, 0).unwrap()); // bltu
    assert!(branch_taken(0x5, 0, 0xFFFF_FFFF).unwrap()); // bge: 0 >= -1
    assert!(branch_taken(0x7, 0xFFFF_FFFF, 1).unwrap()); // bgeu
}

#[test]
fn test_branch_bad_funct3_is_unsupported() {
    assert_eq!(branch_taken(0x2, 1, 2), Err(AluError::Unsupported));
    assert_eq!(branch_taken(0x3, 1, 2), Err(AluError::Unsupported));
}
