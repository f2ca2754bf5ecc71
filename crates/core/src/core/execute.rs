//! Per-format executor methods.
//!
//! One method per instruction shape. Every method performs exactly one
//! architectural step and advances the pc by 4; branches and jumps set the
//! pc explicitly.

use crate::common::error::SimError;
use crate::isa::instruction::{Instruction, InstructionBits};
use crate::isa::opcodes;

use super::{alu, alu_fault, lsu, Cpu};

impl Cpu {
    /// Executes one decoded instruction.
    ///
    /// The raw word disambiguates the shapes that cover several opcodes
    /// (loads vs. immediate ALU vs. JALR, and LUI vs. AUIPC).
    pub(crate) fn execute(&mut self, word: u32, inst: Instruction) -> Result<(), SimError> {
        match inst {
            Instruction::R {
                funct3,
                funct7,
                rd,
                rs1,
                rs2,
            } => self.exec_register(word, funct3, funct7, rd, rs1, rs2),
            Instruction::I {
                funct3,
                rd,
                rs1,
                imm,
            } => match word.opcode() {
                opcodes::OP_LOAD => self.exec_load(word, funct3, rd, rs1, imm),
                opcodes::OP_JALR => self.exec_jalr(rd, rs1, imm),
                _ => self.exec_immediate(word, funct3, rd, rs1, imm),
            },
            Instruction::S {
                funct3,
                rs1,
                rs2,
                imm,
            } => self.exec_store(word, funct3, rs1, rs2, imm),
            Instruction::B {
                funct3,
                rs1,
                rs2,
                imm,
            } => self.exec_branch(word, funct3, rs1, rs2, imm),
            Instruction::U { rd, imm } => {
                if word.opcode() == opcodes::OP_LUI {
                    self.exec_lui(rd, imm)
                } else {
                    self.exec_auipc(rd, imm)
                }
            }
            Instruction::J { rd, imm } => self.exec_jal(rd, imm),
        }
    }

    fn exec_register(
        &mut self,
        word: u32,
        funct3: u32,
        funct7: u32,
        rd: usize,
        rs1: usize,
        rs2: usize,
    ) -> Result<(), SimError> {
        let a = self.regs.read(rs1);
        let b = self.regs.read(rs2);
        let val = alu::register_op(funct3, funct7, a, b).map_err(|e| alu_fault(word, e))?;
        self.regs.write(rd, val);
        self.pc = self.pc.wrapping_add(4);
        self.stats.inst_alu += 1;
        Ok(())
    }

    fn exec_immediate(
        &mut self,
        word: u32,
        funct3: u32,
        rd: usize,
        rs1: usize,
        imm: i32,
    ) -> Result<(), SimError> {
        let a = self.regs.read(rs1);
        let val = alu::immediate_op(funct3, a, imm).map_err(|e| alu_fault(word, e))?;
        self.regs.write(rd, val);
        self.pc = self.pc.wrapping_add(4);
        self.stats.inst_alu += 1;
        Ok(())
    }

    fn exec_load(
        &mut self,
        word: u32,
        funct3: u32,
        rd: usize,
        rs1: usize,
        imm: i32,
    ) -> Result<(), SimError> {
        let addr = self.regs.read(rs1).wrapping_add(imm as u32);
        let val = lsu::load(&self.memory, funct3, addr, word)?;
        self.regs.write(rd, val);
        self.pc = self.pc.wrapping_add(4);
        self.stats.inst_load += 1;
        Ok(())
    }

    fn exec_store(
        &mut self,
        word: u32,
        funct3: u32,
        rs1: usize,
        rs2: usize,
        imm: i32,
    ) -> Result<(), SimError> {
        let addr = self.regs.read(rs1).wrapping_add(imm as u32);
        lsu::store(&mut self.memory, funct3, addr, self.regs.read(rs2), word)?;
        self.pc = self.pc.wrapping_add(4);
        self.stats.inst_store += 1;
        Ok(())
    }

    fn exec_branch(
        &mut self,
        word: u32,
        funct3: u32,
        rs1: usize,
        rs2: usize,
        imm: i32,
    ) -> Result<(), SimError> {
        let a = self.regs.read(rs1);
        let b = self.regs.read(rs2);
        let taken = alu::branch_taken(funct3, a, b).map_err(|e| alu_fault(word, e))?;
        if taken {
            self.pc = self.pc.wrapping_add(imm as u32);
            self.stats.branches_taken += 1;
        } else {
            self.pc = self.pc.wrapping_add(4);
        }
        self.stats.inst_branch += 1;
        Ok(())
    }

    fn exec_jal(&mut self, rd: usize, imm: i32) -> Result<(), SimError> {
        self.regs.write(rd, self.pc.wrapping_add(4));
        self.pc = self.pc.wrapping_add(imm as u32);
        self.stats.inst_jump += 1;
        Ok(())
    }

    fn exec_jalr(&mut self, rd: usize, rs1: usize, imm: i32) -> Result<(), SimError> {
        // Read rs1 before writing rd; the link overwrites rs1 when they alias.
        let target = self.regs.read(rs1).wrapping_add(imm as u32) & !1;
        self.regs.write(rd, self.pc.wrapping_add(4));
        self.pc = target;
        self.stats.inst_jump += 1;
        Ok(())
    }

    fn exec_lui(&mut self, rd: usize, imm: u32) -> Result<(), SimError> {
        self.regs.write(rd, imm);
        self.pc = self.pc.wrapping_add(4);
        self.stats.inst_alu += 1;
        Ok(())
    }

    fn exec_auipc(&mut self, rd: usize, imm: u32) -> Result<(), SimError> {
        self.regs.write(rd, self.pc.wrapping_add(imm));
        self.pc = self.pc.wrapping_add(4);
        self.stats.inst_alu += 1;
        Ok(())
    }
}
