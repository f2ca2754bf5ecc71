//! Fetch stage.

use crate::isa::TERMINATOR;
use crate::pipeline::latches::IfIdEntry;
use crate::pipeline::Shared;

/// Fetch worker: reads instruction words and feeds the decode latch.
///
/// Fetch runs ahead on the fall-through path; a redirect posted by execute
/// moves it to the branch target under a new squash epoch. The termination
/// sentinel and fetch faults are not acted on here: both are forwarded and
/// fetch parks until execute either redirects (the entry was wrong-path) or
/// halts the pipeline.
pub(crate) fn fetch_stage(shared: &Shared) {
    let mut pc = shared.start_pc;
    let mut epoch: u64 = 0;

    loop {
        if shared.signals.halted() {
            break;
        }
        if let Some((target, next_epoch)) = shared.signals.take_redirect() {
            pc = target;
            epoch = next_epoch;
        }

        let fetched = shared.memory.lock().unwrap().load_word(pc);
        match fetched {
            Ok(word) => {
                if shared.trace {
                    eprintln!("IF  pc={:#010x} inst={:#010x}", pc, word);
                }
                let sent = shared.if_id.send(IfIdEntry {
                    pc,
                    word,
                    epoch,
                    trap: None,
                });
                if !sent {
                    break;
                }
                if word == TERMINATOR {
                    // End of the straight-line path; wait for execute to
                    // confirm the halt or prove this was wrong-path.
                    match shared.signals.wait_redirect() {
                        Some((target, next_epoch)) => {
                            pc = target;
                            epoch = next_epoch;
                        }
                        None => break,
                    }
                } else {
                    pc = pc.wrapping_add(4);
                }
            }
            Err(err) => {
                let sent = shared.if_id.send(IfIdEntry {
                    pc,
                    word: 0,
                    epoch,
                    trap: Some(err),
                });
                if !sent {
                    break;
                }
                match shared.signals.wait_redirect() {
                    Some((target, next_epoch)) => {
                        pc = target;
                        epoch = next_epoch;
                    }
                    None => break,
                }
            }
        }
    }

    shared.if_id.close();
}
