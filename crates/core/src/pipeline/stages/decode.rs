//! Decode stage.

use crate::isa::decode::decode;
use crate::pipeline::latches::{IdExEntry, IfIdEntry};
use crate::pipeline::Shared;

/// Decode worker: decodes fetched words and gates them on data hazards.
///
/// An instruction may not enter execute while any in-flight instruction
/// writes one of its source registers; the scoreboard wait here is the
/// pipeline's only stall. Once clean, the instruction's own destination is
/// claimed so younger readers stall in turn. Entries that are already
/// stale are dropped before the hazard gate, and undecodable words are
/// forwarded as poisoned entries for execute to adjudicate.
pub(crate) fn decode_stage(shared: &Shared) {
    while let Some(entry) = shared.if_id.recv() {
        let IfIdEntry {
            pc,
            word,
            epoch,
            trap,
        } = entry;

        // Known wrong-path already; skip the hazard gate entirely.
        if epoch < shared.signals.current_epoch() {
            shared.stats.lock().unwrap().squashed += 1;
            continue;
        }

        let out = if let Some(trap) = trap {
            IdExEntry {
                pc,
                word,
                epoch,
                inst: None,
                trap: Some(trap),
            }
        } else {
            match decode(word) {
                Ok(inst) => {
                    let (rs1, rs2) = inst.sources();
                    match shared.scoreboard.wait_ready(rs1, rs2) {
                        Some(stalled) => {
                            if stalled {
                                shared.stats.lock().unwrap().stalls_data += 1;
                            }
                        }
                        None => break,
                    }
                    if let Some(rd) = inst.destination() {
                        shared.scoreboard.claim(rd);
                    }
                    IdExEntry {
                        pc,
                        word,
                        epoch,
                        inst: Some(inst),
                        trap: None,
                    }
                }
                Err(err) => IdExEntry {
                    pc,
                    word,
                    epoch,
                    inst: None,
                    trap: Some(err),
                },
            }
        };

        if shared.trace {
            eprintln!("ID  pc={:#010x} inst={:#010x}", pc, word);
        }
        if !shared.id_ex.send(out) {
            break;
        }
    }

    shared.id_ex.close();
}
