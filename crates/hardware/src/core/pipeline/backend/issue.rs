//! Issue Stage: select one ready IQ entry per functional unit class.
//!
//! Selection is oldest-ready-first by the entry's age counter, independently
//! for the integer, multiply/divide and branch units. The selected entry
//! leaves the IQ this cycle and is latched into its unit's input.

use tracing::trace;

use super::Backend;
use crate::core::Cpu;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::FuClass;

/// Executes the issue stage.
pub fn issue_stage(cpu: &mut Cpu, backend: &mut Backend) {
    for fu in FuClass::ALL {
        let free = match fu {
            FuClass::Int => backend.int_input.is_empty(),
            FuClass::MulDiv => backend.muldiv.can_accept(),
            FuClass::Branch => backend.branch_input.is_empty(),
        };
        if !free {
            continue;
        }
        let Some(entry) = cpu.iq.select(fu) else {
            continue;
        };
        trace!(pc = entry.pc, rob_index = entry.rob_index, ?fu, age = entry.age, "IS");

        let pkt = entry.to_packet();
        match fu {
            FuClass::Int => backend.int_input.put(pkt),
            FuClass::MulDiv => backend.muldiv.accept(pkt),
            FuClass::Branch => backend.branch_input.put(pkt),
        }
    }
}
