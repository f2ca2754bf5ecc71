//! Memory stage.

use crate::core::lsu;
use crate::pipeline::latches::{MemOp, MemWbEntry};
use crate::pipeline::Shared;

/// Memory worker: the only stage that issues data accesses.
///
/// Loads and stores are serialized through the memory lock shared with
/// fetch, and totally ordered with respect to each other by this stage's
/// single-consumer position in the latch chain. ALU results pass through
/// untouched.
pub(crate) fn mem_stage(shared: &Shared) {
    while let Some(entry) = shared.ex_mem.recv() {
        let value = match entry.op {
            MemOp::Alu { value } => value,
            MemOp::Load { funct3, addr } => {
                let loaded = {
                    let memory = shared.memory.lock().unwrap();
                    lsu::load(&memory, funct3, addr, entry.word)
                };
                match loaded {
                    Ok(value) => value,
                    Err(err) => {
                        release_claim(shared, entry.rd);
                        shared.abort(entry.pc, err);
                        break;
                    }
                }
            }
            MemOp::Store {
                funct3,
                addr,
                value,
            } => {
                let stored = {
                    let mut memory = shared.memory.lock().unwrap();
                    lsu::store(&mut memory, funct3, addr, value, entry.word)
                };
                if let Err(err) = stored {
                    shared.abort(entry.pc, err);
                    break;
                }
                0
            }
        };

        if shared.trace {
            eprintln!("MEM pc={:#010x} inst={:#010x}", entry.pc, entry.word);
        }
        let sent = shared.mem_wb.send(MemWbEntry {
            pc: entry.pc,
            word: entry.word,
            rd: entry.rd,
            value,
            kind: entry.kind,
        });
        if !sent {
            break;
        }
    }

    shared.mem_wb.close();
}

fn release_claim(shared: &Shared, rd: Option<usize>) {
    if let Some(rd) = rd {
        shared.scoreboard.release(rd);
    }
}
