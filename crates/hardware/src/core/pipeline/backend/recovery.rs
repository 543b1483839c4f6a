//! Misprediction recovery.
//!
//! Squashing everything younger than a mispredicted branch:
//! 1. Truncates the ROB after the branch and removes every IQ, LSQ, unit,
//!    bus and writeback entry that refers to a discarded slot.
//! 2. Returns the discarded entries' physical registers to the free list.
//! 3. Restores, from the branch's checkpoint, the rename-table slots whose
//!    most recent instance was discarded, along with the BTB.

use tracing::{debug, warn};

use super::Backend;
use crate::core::Cpu;
use crate::core::rename::PhysReg;

/// Discards every instruction younger than the one in ROB slot `rob_index`.
pub fn squash_younger(cpu: &mut Cpu, backend: &mut Backend, rob_index: usize) {
    let squashed = cpu.rob.flush_after(rob_index);
    let slots: Vec<usize> = squashed.iter().map(|(idx, _)| *idx).collect();
    let is_squashed = |idx: usize| slots.contains(&idx);

    let _ = cpu.iq.squash(is_squashed);
    let _ = cpu.lsq.squash(is_squashed);
    backend.squash(is_squashed);

    let freed: Vec<PhysReg> = squashed.iter().filter_map(|(_, entry)| entry.phys).collect();
    for &reg in &freed {
        cpu.free_list.release(reg);
    }

    match cpu.checkpoints.take(rob_index) {
        Some(checkpoint) => {
            let free_list = &cpu.free_list;
            cpu.rename.restore_squashed(
                &checkpoint.rename,
                |reg| freed.contains(&reg),
                |reg| free_list.contains(reg),
            );
            cpu.btb = checkpoint.btb;
        }
        None => warn!(rob_index, "no checkpoint for mispredicted branch"),
    }

    cpu.stats.flushes += 1;
    cpu.stats.squashed += squashed.len() as u64;
    debug!(rob_index, squashed = squashed.len(), freed = freed.len(), "flush");
}
