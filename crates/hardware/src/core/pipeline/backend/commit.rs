//! Commit Stage: retire the ROB head.
//!
//! This stage retires at most one instruction per cycle, in program order:
//! 1. Stops the simulation when the head is `HALT`.
//! 2. Reports the fault of a faulted head; the entry stays in place.
//! 3. Publishes the result to the ARF (and condition-code alias for flag
//!    setters), hands each renamed slot back to the ARF only if the retiring
//!    register is still its most recent instance, and frees the register.

use tracing::debug;

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::cpu::{HaltReason, RetireRecord};
use crate::core::pipeline::rob::{RobEntry, RobState};
use crate::isa::{InsnClass, MemKind, Opcode};

/// Executes the commit stage.
///
/// Returns `Ok(Some(_))` when `HALT` retires.
///
/// # Errors
///
/// Returns the fault recorded on the ROB head.
pub fn commit_stage(cpu: &mut Cpu) -> Result<Option<HaltReason>, SimError> {
    let Some(head) = cpu.rob.peek_head() else {
        return Ok(None);
    };
    match head.state {
        RobState::Issued => return Ok(None),
        RobState::Faulted => {
            if let Some(fault) = &head.fault {
                return Err(fault.clone());
            }
        }
        RobState::Completed => {}
    }

    let Some((rob_index, entry)) = cpu.rob.commit_head() else {
        return Ok(None);
    };

    if let Some(phys) = entry.phys {
        if let Some(rd) = entry.rd {
            cpu.arf.write(rd, entry.result);
            let _ = cpu.rename.retire_if_current(rd, phys);
        }
        if entry.writes_cc {
            let cc = cpu.arf.cc_index();
            cpu.arf.write(cc, entry.result);
            let _ = cpu.rename.retire_if_current(cc, phys);
        }
        cpu.free_list.release(phys);
    }

    record(cpu, rob_index, &entry);
    debug!(
        cycle = cpu.stats.cycles,
        pc = entry.pc,
        rob_index,
        opcode = %entry.opcode,
        result = entry.result,
        "CM"
    );

    if entry.opcode == Opcode::Halt {
        return Ok(Some(HaltReason::HaltInstruction));
    }
    Ok(None)
}

fn record(cpu: &mut Cpu, rob_index: usize, entry: &RobEntry) {
    let stats = &mut cpu.stats;
    stats.instructions_retired += 1;
    match entry.class {
        InsnClass::Integer => stats.inst_int += 1,
        InsnClass::MulDiv => stats.inst_muldiv += 1,
        InsnClass::Branch => stats.inst_branch += 1,
        InsnClass::Memory => match entry.opcode.info().mem {
            Some(MemKind::Store) => stats.inst_store += 1,
            _ => stats.inst_load += 1,
        },
    }
    let cycle = stats.cycles;
    cpu.record_retirement(RetireRecord {
        cycle,
        rob_index,
        pc: entry.pc,
        opcode: entry.opcode,
    });
}
