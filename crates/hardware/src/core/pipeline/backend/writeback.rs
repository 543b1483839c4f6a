//! Writeback Stage: publish results to the PRF and complete ROB entries.
//!
//! Results arrive here one cycle after their forwarding broadcast. The stage
//! writes the destination register, marks it valid and repeats the wake-up
//! broadcast: an instruction that dispatched while its producer was on a bus
//! captured only the tag, and would otherwise wait forever. Faulted results
//! mark their ROB entry faulted and write nothing.

use tracing::trace;

use crate::core::Cpu;
use crate::core::pipeline::latches::ResultPacket;

/// Executes the writeback stage.
pub fn writeback_stage(cpu: &mut Cpu, input: &mut Vec<ResultPacket>) {
    for result in input.drain(..) {
        if let Some(fault) = result.fault {
            trace!(pc = result.pc, rob_index = result.rob_index, %fault, "WB  fault");
            cpu.rob.fault(result.rob_index, fault);
            continue;
        }
        if let Some(dest) = result.dest {
            cpu.prf.write(dest, result.value, result.flags);
            cpu.broadcast(dest, result.value);
        }
        cpu.rob.complete(result.rob_index, result.value, result.flags);
        trace!(
            pc = result.pc,
            rob_index = result.rob_index,
            dest = ?result.dest,
            value = result.value,
            "WB"
        );
    }
}
