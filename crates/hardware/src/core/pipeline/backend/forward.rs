//! Forward Stage: broadcast results and resolve branches.
//!
//! The branch bus is handled first. A resolved control-flow instruction clears
//! the unresolved flag, trains the BTB and either discards its checkpoint or,
//! on a misprediction, squashes everything younger before any other bus is
//! broadcast.
//!
//! The remaining buses broadcast in the order memory, integer, mul/div. An
//! integer result that is a memory instruction's address goes to its LSQ
//! entry instead, after a bounds check. Every other result wakes the IQ and
//! LSQ entries waiting on its tag and moves on to writeback.

use tracing::{debug, trace};

use super::Backend;
use super::recovery::squash_younger;
use crate::common::constants::Word;
use crate::core::Cpu;
use crate::core::pipeline::latches::{BranchOutcome, ResultPacket};

/// Executes the forward stage.
///
/// Returns the corrected fetch address after a misprediction.
pub fn forward_stage(cpu: &mut Cpu, backend: &mut Backend) -> Option<Word> {
    let mut redirect = None;

    if let Some(result) = backend.buses.branch.take() {
        if let Some(outcome) = result.branch {
            redirect = resolve(cpu, backend, &result, outcome);
        }
        broadcast(cpu, &result);
        backend.writeback.push(result);
    }

    for result in backend.buses.drain_data() {
        if let Some(lsq_index) = result.lsq_index {
            match cpu.memory.check(result.pc, result.value) {
                Ok(address) => {
                    trace!(pc = result.pc, lsq_index, address, "FW  address");
                    cpu.lsq.set_address(lsq_index, address);
                }
                Err(fault) => cpu.rob.fault(result.rob_index, fault),
            }
            continue;
        }
        broadcast(cpu, &result);
        backend.writeback.push(result);
    }

    redirect
}

fn broadcast(cpu: &mut Cpu, result: &ResultPacket) {
    if result.fault.is_some() {
        return;
    }
    if let Some(dest) = result.dest {
        trace!(pc = result.pc, %dest, value = result.value, "FW");
        cpu.broadcast(dest, result.value);
    }
}

fn resolve(cpu: &mut Cpu, backend: &mut Backend, result: &ResultPacket, outcome: BranchOutcome) -> Option<Word> {
    cpu.branch_unresolved = false;

    let redirect = if outcome.mispredicted {
        cpu.stats.branch_mispredictions += 1;
        debug!(
            pc = result.pc,
            rob_index = result.rob_index,
            taken = outcome.taken,
            next_pc = outcome.next_pc,
            "FW  mispredict"
        );
        squash_younger(cpu, backend, result.rob_index);
        Some(outcome.next_pc)
    } else {
        cpu.stats.branch_predictions += 1;
        let _ = cpu.checkpoints.take(result.rob_index);
        trace!(pc = result.pc, taken = outcome.taken, "FW  branch confirmed");
        None
    };

    cpu.btb.update(result.pc, outcome.target, outcome.taken);
    redirect
}
