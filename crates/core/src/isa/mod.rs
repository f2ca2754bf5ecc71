//! Instruction set definitions for RV32I and the M multiply/divide subset.

pub mod abi;
pub mod decode;
pub mod instruction;

/// Instruction word that ends the run: the canonical `ret` encoding
/// (`jalr x0, x1, 0`). Fetch halts when it observes this word, before
/// executing it.
pub const TERMINATOR: u32 = 0x0000_8067;

/// Major opcodes (bits 6-0).
pub mod opcodes {
    /// Load instructions (LB, LH, LW, LBU, LHU).
    pub const OP_LOAD: u32 = 0b0000011;
    /// Immediate arithmetic instructions (ADDI, ANDI, SLLI, ...).
    pub const OP_IMM: u32 = 0b0010011;
    /// Add Upper Immediate to PC (AUIPC).
    pub const OP_AUIPC: u32 = 0b0010111;
    /// Store instructions (SB, SH, SW).
    pub const OP_STORE: u32 = 0b0100011;
    /// Register-register arithmetic (ADD, SUB, SLL, ...).
    pub const OP_REG: u32 = 0b0110011;
    /// Load Upper Immediate (LUI).
    pub const OP_LUI: u32 = 0b0110111;
    /// Conditional branches (BEQ, BNE, ...).
    pub const OP_BRANCH: u32 = 0b1100011;
    /// Jump and Link Register (JALR).
    pub const OP_JALR: u32 = 0b1100111;
    /// Jump and Link (JAL).
    pub const OP_JAL: u32 = 0b1101111;
}

/// Function codes (bits 14-12) distinguishing instructions that share a
/// major opcode.
pub mod funct3 {
    pub const LB: u32 = 0b000;
    pub const LH: u32 = 0b001;
    pub const LW: u32 = 0b010;
    pub const LBU: u32 = 0b100;
    pub const LHU: u32 = 0b101;

    pub const SB: u32 = 0b000;
    pub const SH: u32 = 0b001;
    pub const SW: u32 = 0b010;

    pub const BEQ: u32 = 0b000;
    pub const BNE: u32 = 0b001;
    pub const BLT: u32 = 0b100;
    pub const BGE: u32 = 0b101;
    pub const BLTU: u32 = 0b110;
    pub const BGEU: u32 = 0b111;

    pub const ADD_SUB: u32 = 0b000;
    pub const SLL: u32 = 0b001;
    pub const SLT: u32 = 0b010;
    pub const SLTU: u32 = 0b011;
    pub const XOR: u32 = 0b100;
    pub const SRL_SRA: u32 = 0b101;
    pub const OR: u32 = 0b110;
    pub const AND: u32 = 0b111;

    pub const MUL: u32 = 0b000;
    pub const MULH: u32 = 0b001;
    pub const MULHSU: u32 = 0b010;
    pub const MULHU: u32 = 0b011;
    pub const DIV: u32 = 0b100;
    pub const DIVU: u32 = 0b101;
    pub const REM: u32 = 0b110;
    pub const REMU: u32 = 0b111;
}

/// Function codes (bits 31-25) selecting between standard and alternate
/// encodings, and the M-extension plane.
pub mod funct7 {
    pub const DEFAULT: u32 = 0b0000000;
    pub const SUB: u32 = 0b0100000;
    pub const SRA: u32 = 0b0100000;
    pub const M_EXTENSION: u32 = 0b0000001;
}
