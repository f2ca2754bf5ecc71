//! Execute stage.

use crate::core::{alu, alu_fault};
use crate::isa::instruction::{Instruction, InstructionBits};
use crate::isa::{opcodes, TERMINATOR};
use crate::pipeline::latches::{ExMemEntry, MemOp, RetireKind};
use crate::pipeline::Shared;

/// Execute worker: performs ALU work, resolves control flow, and owns the
/// squash epoch.
///
/// Execute is the in-order adjudication point. Entries fetched under an
/// older epoch are wrong-path: they are dropped and their scoreboard claims
/// released. Faults carried by surviving entries are genuine and abort the
/// run; a surviving termination sentinel raises the halt flag. Taken
/// branches and jumps bump the epoch and post the redirect fetch resumes
/// from.
pub(crate) fn execute_stage(shared: &Shared) {
    let mut epoch: u64 = 0;

    while let Some(entry) = shared.id_ex.recv() {
        if entry.epoch < epoch {
            if let Some(inst) = entry.inst {
                if let Some(rd) = inst.destination() {
                    shared.scoreboard.release(rd);
                }
            }
            shared.stats.lock().unwrap().squashed += 1;
            continue;
        }

        if let Some(trap) = entry.trap {
            shared.abort(entry.pc, trap);
            break;
        }

        if entry.word == TERMINATOR {
            if shared.trace {
                eprintln!("EX  pc={:#010x} ret -- halting", entry.pc);
            }
            shared.signals.raise_halt();
            continue;
        }

        let inst = match entry.inst {
            Some(inst) => inst,
            None => continue,
        };
        let pc = entry.pc;
        let word = entry.word;

        let step = compute(shared, &mut epoch, pc, word, inst);
        let (rd, op, kind) = match step {
            Ok(out) => out,
            Err((fault_pc, err)) => {
                // The faulting instruction still holds its claim.
                if let Some(rd) = inst.destination() {
                    shared.scoreboard.release(rd);
                }
                shared.abort(fault_pc, err);
                break;
            }
        };

        if shared.trace {
            eprintln!("EX  pc={:#010x} inst={:#010x}", pc, word);
        }
        let sent = shared.ex_mem.send(ExMemEntry {
            pc,
            word,
            rd,
            op,
            kind,
        });
        if !sent {
            break;
        }
    }

    shared.ex_mem.close();
}

type StepResult = Result<(Option<usize>, MemOp, RetireKind), (u32, crate::common::error::SimError)>;

/// Computes one instruction's execute-stage result.
///
/// Reads the register file under its lock; the hazard gate in decode
/// guarantees no in-flight writer targets these sources.
fn compute(shared: &Shared, epoch: &mut u64, pc: u32, word: u32, inst: Instruction) -> StepResult {
    let rd = inst.destination();
    match inst {
        Instruction::R {
            funct3,
            funct7,
            rs1,
            rs2,
            ..
        } => {
            let (a, b) = read_pair(shared, rs1, rs2);
            let value =
                alu::register_op(funct3, funct7, a, b).map_err(|e| (pc, alu_fault(word, e)))?;
            Ok((rd, MemOp::Alu { value }, RetireKind::Alu))
        }
        Instruction::I {
            funct3, rs1, imm, ..
        } => {
            let a = shared.regs.lock().unwrap().read(rs1);
            match word.opcode() {
                opcodes::OP_LOAD => {
                    let addr = a.wrapping_add(imm as u32);
                    Ok((rd, MemOp::Load { funct3, addr }, RetireKind::Load))
                }
                opcodes::OP_JALR => {
                    let target = a.wrapping_add(imm as u32) & !1;
                    *epoch = shared.signals.redirect(target);
                    let value = pc.wrapping_add(4);
                    Ok((rd, MemOp::Alu { value }, RetireKind::Jump))
                }
                _ => {
                    let value =
                        alu::immediate_op(funct3, a, imm).map_err(|e| (pc, alu_fault(word, e)))?;
                    Ok((rd, MemOp::Alu { value }, RetireKind::Alu))
                }
            }
        }
        Instruction::S {
            funct3,
            rs1,
            rs2,
            imm,
        } => {
            let (a, b) = read_pair(shared, rs1, rs2);
            let addr = a.wrapping_add(imm as u32);
            Ok((
                None,
                MemOp::Store {
                    funct3,
                    addr,
                    value: b,
                },
                RetireKind::Store,
            ))
        }
        Instruction::B {
            funct3,
            rs1,
            rs2,
            imm,
        } => {
            let (a, b) = read_pair(shared, rs1, rs2);
            let taken = alu::branch_taken(funct3, a, b).map_err(|e| (pc, alu_fault(word, e)))?;
            if taken {
                *epoch = shared.signals.redirect(pc.wrapping_add(imm as u32));
            }
            Ok((None, MemOp::Alu { value: 0 }, RetireKind::Branch { taken }))
        }
        Instruction::U { imm, .. } => {
            let value = if word.opcode() == opcodes::OP_LUI {
                imm
            } else {
                pc.wrapping_add(imm)
            };
            Ok((rd, MemOp::Alu { value }, RetireKind::Alu))
        }
        Instruction::J { imm, .. } => {
            *epoch = shared.signals.redirect(pc.wrapping_add(imm as u32));
            let value = pc.wrapping_add(4);
            Ok((rd, MemOp::Alu { value }, RetireKind::Jump))
        }
    }
}

fn read_pair(shared: &Shared, rs1: usize, rs2: usize) -> (u32, u32) {
    let regs = shared.regs.lock().unwrap();
    (regs.read(rs1), regs.read(rs2))
}
