//! # Interpreter Tests
//!
//! Single-step and short-program tests for the interpreter engine.

use rv32sim_core::core::Cpu;
use rv32sim_core::SimError;

use crate::common::builder::*;
use crate::common::harness::{assemble, run_interpreter, run_interpreter_err};

#[test]
fn test_pc_advances_by_four_on_straight_line() {
    let mut cpu = Cpu::new(assemble(0, &[addi(1, 0, 1), addi(2, 0, 2), ret()]), false);
    assert_eq!(cpu.pc, 0);
    assert!(cpu.step().unwrap());
    assert_eq!(cpu.pc, 4);
    assert!(cpu.step().unwrap());
    assert_eq!(cpu.pc, 8);
}

#[test]
fn test_terminator_halts_without_executing() {
    let mut cpu = Cpu::new(assemble(0, &[addi(1, 0, 5), ret()]), false);
    cpu.run().unwrap();
    // The sentinel is JALR x1-relative; executing it would move the pc to
    // x1 & !1 = 4. It must instead stay at the sentinel's address.
    assert_eq!(cpu.pc, 4);
    assert_eq!(cpu.regs.read(1), 5);
}

#[test]
fn test_writes_to_x0_are_dropped() {
    let cpu = run_interpreter(&[addi(0, 0, 42), lui(0, 0xFFFF_F000), ret()]);
    assert_eq!(cpu.regs.read(0), 0);
}

#[test]
fn test_x0_reads_zero_after_every_instruction() {
    let mut cpu = Cpu::new(
        assemble(0, &[addi(0, 0, 1), add(0, 1, 2), jal(0, 4), ret()]),
        false,
    );
    while cpu.step().unwrap() {
        assert_eq!(cpu.regs.read(0), 0);
    }
}

#[test]
fn test_load_store_widths() {
    let cpu = run_interpreter(&[
        addi(1, 0, 0x100),
        addi(2, 0, -1), // 0xFFFFFFFF
        sw(2, 1, 0),
        encode_i(0x03, 0x0, 3, 1, 0), // lb  -> sign-extends 0xFF
        encode_i(0x03, 0x4, 4, 1, 0), // lbu -> zero-extends
        encode_i(0x03, 0x1, 5, 1, 0), // lh
        encode_i(0x03, 0x5, 6, 1, 0), // lhu
        ret(),
    ]);
    assert_eq!(cpu.regs.read(3), 0xFFFF_FFFF);
    assert_eq!(cpu.regs.read(4), 0xFF);
    assert_eq!(cpu.regs.read(5), 0xFFFF_FFFF);
    assert_eq!(cpu.regs.read(6), 0xFFFF);
}

#[test]
fn test_store_byte_and_half_truncate() {
    let cpu = run_interpreter(&[
        lui(2, 0x12345000),
        addi(2, 2, 0x678),
        addi(1, 0, 0x200),
        encode_s(0x0, 1, 2, 0), // sb
        encode_s(0x1, 1, 2, 4), // sh
        ret(),
    ]);
    assert_eq!(cpu.memory.load_byte(0x200).unwrap(), 0x78);
    assert_eq!(cpu.memory.load_half(0x204).unwrap(), 0x5678);
}

#[test]
fn test_branch_taken_skips_instruction() {
    let cpu = run_interpreter(&[
        addi(1, 0, 3),
        addi(2, 0, 3),
        beq(1, 2, 8), // to pc+8, over the next instruction
        addi(5, 0, 1),
        ret(),
    ]);
    assert_eq!(cpu.regs.read(5), 0);
    assert_eq!(cpu.pc, 16);
}

#[test]
fn test_branch_not_taken_falls_through() {
    let cpu = run_interpreter(&[
        addi(1, 0, 3),
        addi(2, 0, 4),
        beq(1, 2, 8),
        addi(5, 0, 1),
        ret(),
    ]);
    assert_eq!(cpu.regs.read(5), 1);
}

#[test]
fn test_backward_branch_loops() {
    // Counts x1 down from 5; x2 accumulates the iterations.
    let cpu = run_interpreter(&[
        addi(1, 0, 5),
        addi(2, 0, 0),
        addi(2, 2, 1),
        addi(1, 1, -1),
        bne(1, 0, -8),
        ret(),
    ]);
    assert_eq!(cpu.regs.read(1), 0);
    assert_eq!(cpu.regs.read(2), 5);
}

#[test]
fn test_jal_links_and_jumps() {
    let mut mem = assemble(0x40, &[jal(1, 0x20)]);
    mem.store_word(0x60, ret()).unwrap();
    let mut cpu = Cpu::new(mem, false);
    cpu.run().unwrap();
    assert_eq!(cpu.regs.read(1), 0x44);
    assert_eq!(cpu.pc, 0x60);
}

#[test]
fn test_jalr_clears_low_bit_and_links() {
    let mut mem = assemble(
        0,
        &[
            addi(2, 0, 0x21), // odd target; JALR must clear bit 0
            jalr(3, 2, 0),
        ],
    );
    mem.store_word(0x20, ret()).unwrap();
    let mut cpu = Cpu::new(mem, false);
    cpu.run().unwrap();
    assert_eq!(cpu.regs.read(3), 8);
    assert_eq!(cpu.pc, 0x20);
}

#[test]
fn test_jalr_reads_base_before_writing_link() {
    // rd == rs1: the target must come from the old register value.
    let mut mem = assemble(0, &[addi(1, 0, 0x30), jalr(1, 1, 0)]);
    mem.store_word(0x30, ret()).unwrap();
    let mut cpu = Cpu::new(mem, false);
    cpu.run().unwrap();
    assert_eq!(cpu.regs.read(1), 8);
    assert_eq!(cpu.pc, 0x30);
}

#[test]
fn test_lui_and_auipc() {
    let cpu = run_interpreter(&[
        lui(1, 0xABCDE000),
        encode_u(0x17, 2, 0x1000), // auipc x2, 0x1000 at pc=4
        ret(),
    ]);
    assert_eq!(cpu.regs.read(1), 0xABCD_E000);
    assert_eq!(cpu.regs.read(2), 0x1004);
}

#[test]
fn test_sp_initialized_from_memory() {
    let cpu = Cpu::new(assemble(0, &[ret()]), false);
    assert_eq!(cpu.regs.read(2), 0x10000);
}

#[test]
fn test_zero_word_is_fatal() {
    let err = run_interpreter_err(&[addi(1, 0, 1), 0]);
    assert_eq!(err, SimError::UnsupportedInstruction { word: 0 });
}

#[test]
fn test_divide_by_zero_is_fatal() {
    let div = encode_r(0x4, 0x01, 3, 1, 2);
    let err = run_interpreter_err(&[addi(1, 0, 10), div, ret()]);
    assert_eq!(err, SimError::DivideByZero { word: div });
}

#[test]
fn test_load_out_of_range_is_fatal() {
    let err = run_interpreter_err(&[lw(1, 0, -4), ret()]);
    assert!(matches!(err, SimError::MemoryOutOfRange { .. }));
}

#[test]
fn test_unknown_r_plane_is_fatal() {
    let bad = encode_r(0x1, 0x20, 1, 2, 3); // no SLL in the SUB/SRA plane
    let err = run_interpreter_err(&[bad, ret()]);
    assert_eq!(err, SimError::UnsupportedInstruction { word: bad });
}
