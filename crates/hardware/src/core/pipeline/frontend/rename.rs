//! Rename-Dispatch Stage: gate control flow.
//!
//! Only one control-flow instruction may be unresolved. A branch, jump, `JALR`
//! or `RET` waits here while another is outstanding; when it passes it raises
//! the unresolved flag, and a conditional branch without a BTB entry gets a
//! not-taken one pointing at its target.

use tracing::trace;

use crate::core::Cpu;
use crate::core::pipeline::latches::{DecodedInst, Latch};
use crate::core::pipeline::traits::PipelineLatch;

/// Executes the rename-dispatch stage.
pub fn rename_stage(cpu: &mut Cpu, input: &mut Latch<DecodedInst>, output: &mut Latch<DecodedInst>) {
    let Some(decoded) = input.peek() else {
        return;
    };
    if !output.is_empty() {
        input.stalled = true;
        return;
    }
    if decoded.info.control_flow && cpu.branch_unresolved {
        trace!(pc = decoded.pc, "RN  stall: branch unresolved");
        cpu.stats.stalls_branch += 1;
        input.stalled = true;
        return;
    }

    let Some(decoded) = input.take() else {
        return;
    };
    if decoded.info.control_flow {
        cpu.branch_unresolved = true;
        if decoded.inst.opcode.is_conditional() {
            cpu.btb
                .reserve(decoded.pc, decoded.pc.wrapping_add(decoded.inst.imm));
        }
    }
    output.put(decoded);
}
