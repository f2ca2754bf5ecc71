//! Instruction decoder.
//!
//! This module decodes 32-bit RISC-V instruction encodings into the tagged
//! `Instruction` format. It extracts the opcode, register indices, and
//! function codes, and sign-extends the immediate of each format (R, I, S,
//! B, U, J).

use crate::common::error::SimError;
use crate::isa::instruction::{Instruction, InstructionBits};
use crate::isa::opcodes;

/// Total width of an instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Decodes an instruction word into its format-tagged representation.
///
/// The all-zero word and any opcode outside the supported set are rejected
/// as `UnsupportedInstruction`; funct3/funct7 validation is left to the
/// executor, which knows which combinations carry semantics.
///
/// # Arguments
///
/// * `word` - The 32-bit instruction encoding to decode.
///
/// # Returns
///
/// The decoded `Instruction`, or `SimError::UnsupportedInstruction`.
pub fn decode(word: u32) -> Result<Instruction, SimError> {
    if word == 0 {
        return Err(SimError::UnsupportedInstruction { word });
    }

    match word.opcode() {
        opcodes::OP_REG => Ok(Instruction::R {
            funct3: word.funct3(),
            funct7: word.funct7(),
            rd: word.rd(),
            rs1: word.rs1(),
            rs2: word.rs2(),
        }),
        opcodes::OP_LOAD | opcodes::OP_IMM | opcodes::OP_JALR => Ok(Instruction::I {
            funct3: word.funct3(),
            rd: word.rd(),
            rs1: word.rs1(),
            imm: i_type_imm(word),
        }),
        opcodes::OP_STORE => Ok(Instruction::S {
            funct3: word.funct3(),
            rs1: word.rs1(),
            rs2: word.rs2(),
            imm: s_type_imm(word),
        }),
        opcodes::OP_BRANCH => Ok(Instruction::B {
            funct3: word.funct3(),
            rs1: word.rs1(),
            rs2: word.rs2(),
            imm: b_type_imm(word),
        }),
        opcodes::OP_LUI | opcodes::OP_AUIPC => Ok(Instruction::U {
            rd: word.rd(),
            imm: word & 0xFFFF_F000,
        }),
        opcodes::OP_JAL => Ok(Instruction::J {
            rd: word.rd(),
            imm: j_type_imm(word),
        }),
        _ => Err(SimError::UnsupportedInstruction { word }),
    }
}

/// Decodes the I-Type immediate.
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`. The immediate
/// occupies the upper 12 bits; the arithmetic shift sign-extends it.
fn i_type_imm(word: u32) -> i32 {
    (word as i32) >> 20
}

/// Decodes the S-Type immediate.
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`. The
/// immediate is split across two non-contiguous fields.
fn s_type_imm(word: u32) -> i32 {
    let low = (word >> 7) & 0x1F;
    let high = (word >> 25) & 0x7F;
    sign_extend((high << 5) | low, 12)
}

/// Decodes the B-Type immediate.
///
/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] |
/// imm[11] | opcode`. The immediate is a signed even offset.
fn b_type_imm(word: u32) -> i32 {
    let bit_11 = (word >> 7) & 0x1;
    let bits_4_1 = (word >> 8) & 0xF;
    let bits_10_5 = (word >> 25) & 0x3F;
    let bit_12 = (word >> 31) & 0x1;

    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, 13)
}

/// Decodes the J-Type immediate.
///
/// J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd |
/// opcode`. The immediate is a signed even offset.
fn j_type_imm(word: u32) -> i32 {
    let bits_19_12 = (word >> 12) & 0xFF;
    let bit_11 = (word >> 20) & 0x1;
    let bits_10_1 = (word >> 21) & 0x3FF;
    let bit_20 = (word >> 31) & 0x1;

    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined, 21)
}

/// Sign-extends a value of `bits` width to a 32-bit signed integer.
///
/// # Arguments
///
/// * `val` - The value to extend.
/// * `bits` - The number of valid bits in `val`.
fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = INSTRUCTION_WIDTH - bits;
    ((val as i32) << shift) >> shift
}
