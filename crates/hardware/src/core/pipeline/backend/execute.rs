//! Execute Stage: advance every functional unit by one cycle.
//!
//! The integer and branch units finish the packet issued last cycle. The
//! multiply/divide pipeline shifts by one stage and the memory unit counts
//! down its access. Whatever completes is placed on that unit's bus.

use tracing::trace;

use super::Backend;
use crate::core::Cpu;
use crate::core::units::alu::Alu;
use crate::core::units::bru::BranchUnit;

/// Executes the execute stage.
pub fn execute_stage(cpu: &mut Cpu, backend: &mut Backend) {
    debug_assert!(backend.buses.is_empty(), "forwarding buses not drained");

    if let Some(pkt) = backend.int_input.take() {
        let result = Alu::execute(&pkt);
        trace!(pc = pkt.pc, rob_index = pkt.rob_index, value = result.value, "EX  int");
        backend.buses.int = Some(result);
    }

    if let Some(pkt) = backend.branch_input.take() {
        let result = BranchUnit::execute(&pkt);
        trace!(
            pc = pkt.pc,
            rob_index = pkt.rob_index,
            outcome = ?result.branch,
            "EX  branch"
        );
        backend.buses.branch = Some(result);
    }

    backend.buses.muldiv = backend.muldiv.tick();
    backend.buses.memory = backend.mem_unit.tick(&mut cpu.memory);
}
