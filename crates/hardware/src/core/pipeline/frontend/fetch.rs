//! Fetch Stage: read the code image and predict the next address.
//!
//! The stage performs the following:
//! 1. **Fetch:** Reads the instruction at `cpu.pc`; leaving the code image stops fetch.
//! 2. **Prediction:** Consults the BTB; a taken entry redirects the next fetch
//!    to its target, otherwise fetch falls through to `pc + 4`.
//! 3. **Halt:** Fetching `HALT` stops fetch until a redirect restarts it.

use tracing::trace;

use crate::core::Cpu;
use crate::core::pipeline::latches::{FetchedInst, Latch};
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::Opcode;

/// Executes the fetch stage.
pub fn fetch_stage(cpu: &mut Cpu, output: &mut Latch<FetchedInst>) {
    if cpu.fetch_halted {
        return;
    }
    if !output.is_empty() {
        output.stalled = true;
        return;
    }

    let pc = cpu.pc;
    let Some(inst) = cpu.program.fetch(pc).copied() else {
        trace!(pc, "fetch left the code image");
        cpu.fetch_halted = true;
        return;
    };

    let pred_next_pc = cpu
        .btb
        .predict(pc)
        .unwrap_or_else(|| Cpu::next_sequential(pc));
    trace!(pc, %inst, pred_next_pc, "IF");

    output.put(FetchedInst {
        pc,
        inst,
        pred_next_pc,
    });
    cpu.pc = pred_next_pc;
    if inst.opcode == Opcode::Halt {
        cpu.fetch_halted = true;
    }
}
