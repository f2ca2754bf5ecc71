//! Arithmetic-logic semantics.
//!
//! Pure functions implementing the register-register, register-immediate,
//! and branch-predicate semantics of RV32I/M. Both execution engines call
//! into this module so their architectural results cannot drift apart.
//!
//! All arithmetic is 32-bit wrapping; shifts take the low 5 bits of the
//! shift operand; signed division truncates toward zero and `i32::MIN / -1`
//! wraps.

use crate::isa::{funct3, funct7};

/// Shift amounts are the low 5 bits of the shift operand.
const SHAMT_MASK: u32 = 0x1F;

/// Faults an ALU operation can raise, mapped to `SimError` by the caller
/// that knows the instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluError {
    /// DIV/DIVU/REM/REMU with a zero divisor.
    DivideByZero,
    /// Unrecognized funct3/funct7 combination.
    Unsupported,
}

/// Computes a register-register operation.
///
/// Dispatches on (funct3, funct7) over the RV32I base plane, the alternate
/// (SUB/SRA) plane, and the M-extension plane.
///
/// # Arguments
///
/// * `f3` - The funct3 selector.
/// * `f7` - The funct7 selector.
/// * `a` - Value of rs1.
/// * `b` - Value of rs2.
pub fn register_op(f3: u32, f7: u32, a: u32, b: u32) -> Result<u32, AluError> {
    match (f3, f7) {
        (funct3::ADD_SUB, funct7::DEFAULT) => Ok(a.wrapping_add(b)),
        (funct3::ADD_SUB, funct7::SUB) => Ok(a.wrapping_sub(b)),
        (funct3::SLL, funct7::DEFAULT) => Ok(a << (b & SHAMT_MASK)),
        (funct3::SLT, funct7::DEFAULT) => Ok(((a as i32) < (b as i32)) as u32),
        (funct3::SLTU, funct7::DEFAULT) => Ok((a < b) as u32),
        (funct3::XOR, funct7::DEFAULT) => Ok(a ^ b),
        (funct3::SRL_SRA, funct7::DEFAULT) => Ok(a >> (b & SHAMT_MASK)),
        (funct3::SRL_SRA, funct7::SRA) => Ok(((a as i32) >> (b & SHAMT_MASK)) as u32),
        (funct3::OR, funct7::DEFAULT) => Ok(a | b),
        (funct3::AND, funct7::DEFAULT) => Ok(a & b),

        (funct3::MUL, funct7::M_EXTENSION) => Ok(a.wrapping_mul(b)),
        (funct3::MULH, funct7::M_EXTENSION) => {
            let prod = (a as i32 as i64).wrapping_mul(b as i32 as i64);
            Ok((prod >> 32) as u32)
        }
        (funct3::MULHSU, funct7::M_EXTENSION) => {
            let prod = (a as i32 as i64).wrapping_mul(b as i64);
            Ok((prod >> 32) as u32)
        }
        (funct3::MULHU, funct7::M_EXTENSION) => {
            let prod = (a as u64) * (b as u64);
            Ok((prod >> 32) as u32)
        }
        (funct3::DIV, funct7::M_EXTENSION) => {
            if b == 0 {
                return Err(AluError::DivideByZero);
            }
            Ok((a as i32).wrapping_div(b as i32) as u32)
        }
        (funct3::DIVU, funct7::M_EXTENSION) => {
            if b == 0 {
                return Err(AluError::DivideByZero);
            }
            Ok(a / b)
        }
        (funct3::REM, funct7::M_EXTENSION) => {
            if b == 0 {
                return Err(AluError::DivideByZero);
            }
            Ok((a as i32).wrapping_rem(b as i32) as u32)
        }
        (funct3::REMU, funct7::M_EXTENSION) => {
            if b == 0 {
                return Err(AluError::DivideByZero);
            }
            Ok(a % b)
        }

        _ => Err(AluError::Unsupported),
    }
}

/// Computes a register-immediate operation.
///
/// For the shift immediates the shift amount is the low 5 bits of the
/// immediate; the upper immediate bits are the funct7 plane carried
/// verbatim (instruction bit 30 selects SRAI over SRLI) and must match a
/// canonical encoding.
///
/// # Arguments
///
/// * `f3` - The funct3 selector.
/// * `a` - Value of rs1.
/// * `imm` - Sign-extended 12-bit immediate.
pub fn immediate_op(f3: u32, a: u32, imm: i32) -> Result<u32, AluError> {
    let shamt = (imm as u32) & SHAMT_MASK;
    let shift_plane = ((imm as u32) >> 5) & 0x7F;

    match f3 {
        funct3::ADD_SUB => Ok(a.wrapping_add(imm as u32)),
        funct3::SLT => Ok(((a as i32) < imm) as u32),
        funct3::SLTU => Ok((a < imm as u32) as u32),
        funct3::XOR => Ok(a ^ imm as u32),
        funct3::OR => Ok(a | imm as u32),
        funct3::AND => Ok(a & imm as u32),
        funct3::SLL if shift_plane == funct7::DEFAULT => Ok(a << shamt),
        funct3::SRL_SRA if shift_plane == funct7::DEFAULT => Ok(a >> shamt),
        funct3::SRL_SRA if shift_plane == funct7::SRA => Ok(((a as i32) >> shamt) as u32),
        _ => Err(AluError::Unsupported),
    }
}

/// Evaluates a branch predicate.
///
/// # Arguments
///
/// * `f3` - The funct3 selector (BEQ, BNE, BLT, BGE, BLTU, BGEU).
/// * `a` - Value of rs1.
/// * `b` - Value of rs2.
pub fn branch_taken(f3: u32, a: u32, b: u32) -> Result<bool, AluError> {
    match f3 {
        funct3::BEQ => Ok(a == b),
        funct3::BNE => Ok(a != b),
        funct3::BLT => Ok((a as i32) < (b as i32)),
        funct3::BGE => Ok((a as i32) >= (b as i32)),
        funct3::BLTU => Ok(a < b),
        funct3::BGEU => Ok(a >= b),
        _ => Err(AluError::Unsupported),
    }
}
