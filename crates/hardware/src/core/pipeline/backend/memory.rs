//! LSQ Drain: send the LSQ head to the memory unit.
//!
//! Only the head may leave, and only while the memory unit is idle. A load
//! needs its address; a store also needs its data and must be the ROB head,
//! so memory is never written by a speculative store.

use tracing::trace;

use crate::core::Cpu;
use crate::core::units::lsu::{MemAccess, MemoryUnit};

/// Executes the LSQ drain stage.
pub fn drain_stage(cpu: &mut Cpu, mem_unit: &mut MemoryUnit) {
    if mem_unit.is_busy() {
        return;
    }
    let rob_head = cpu.rob.head_index();
    if !cpu.lsq.head().is_some_and(|head| head.can_drain(rob_head)) {
        return;
    }
    let Some(entry) = cpu.lsq.pop_head() else {
        return;
    };
    let Some(address) = entry.address else {
        return;
    };

    trace!(pc = entry.pc, rob_index = entry.rob_index, address, kind = ?entry.kind, "MEM start");
    mem_unit.start(MemAccess {
        pc: entry.pc,
        opcode: entry.opcode,
        kind: entry.kind,
        rob_index: entry.rob_index,
        address,
        store_value: entry.data.value,
        dest: entry.dest,
    });
}
