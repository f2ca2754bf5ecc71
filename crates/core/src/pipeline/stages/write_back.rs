//! Write-back stage.

use crate::pipeline::latches::RetireKind;
use crate::pipeline::Shared;

/// Write-back worker: commits results to the register file in order.
///
/// This is the only writer of the register file. Dropping the scoreboard
/// claim after the write is what releases a decode stalled on this
/// destination, so a stalled reader can never observe a half-committed
/// value.
pub(crate) fn wb_stage(shared: &Shared) {
    while let Some(entry) = shared.mem_wb.recv() {
        if let Some(rd) = entry.rd {
            shared.regs.lock().unwrap().write(rd, entry.value);
            shared.scoreboard.release(rd);
        }

        if shared.trace {
            eprintln!("WB  pc={:#010x} inst={:#010x}", entry.pc, entry.word);
        }

        let mut stats = shared.stats.lock().unwrap();
        stats.instructions_retired += 1;
        match entry.kind {
            RetireKind::Alu => stats.inst_alu += 1,
            RetireKind::Load => stats.inst_load += 1,
            RetireKind::Store => stats.inst_store += 1,
            RetireKind::Branch { taken } => {
                stats.inst_branch += 1;
                if taken {
                    stats.branches_taken += 1;
                }
            }
            RetireKind::Jump => stats.inst_jump += 1,
        }
    }
}
