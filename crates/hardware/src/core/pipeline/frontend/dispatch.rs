//! Dispatch Stage: rename registers and allocate back-end entries.
//!
//! An instruction leaves this stage only when every resource it needs is free
//! at once: a ROB slot, an IQ slot if it issues to a unit, an LSQ slot if it
//! touches memory, and a physical register if it writes `rd` or the condition
//! code. Otherwise nothing is allocated and the stage stalls.
//!
//! Sources are read before the destination is renamed, so an instruction that
//! reads its own destination sees the previous producer. Control flow that
//! issues to the branch unit saves a checkpoint after its own renaming.
//!
//! `RET` and `HALT` never enter the IQ. `RET` resolves here from its source
//! register and may redirect fetch; the caller squashes the younger front-end
//! latches when it does.

use tracing::{debug, error, trace};

use crate::common::constants::Word;
use crate::core::Cpu;
use crate::core::pipeline::issue_queue::IqEntry;
use crate::core::pipeline::latches::{DecodedInst, Latch, Operand};
use crate::core::pipeline::lsq::LsqEntry;
use crate::core::pipeline::rob::{RobEntry, RobState};
use crate::isa::{Instruction, MemKind, Opcode, Source};
use crate::stats::SimStats;

/// Resource whose absence held an instruction in dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StallCause {
    /// No ROB slot.
    Rob,
    /// No IQ slot.
    IssueQueue,
    /// No LSQ slot.
    Lsq,
    /// Free list empty.
    PhysReg,
    /// `RET` target register not yet available.
    RetOperand,
}

impl StallCause {
    fn record(self, stats: &mut SimStats) {
        let counter = match self {
            Self::Rob => &mut stats.stalls_rob,
            Self::IssueQueue => &mut stats.stalls_iq,
            Self::Lsq => &mut stats.stalls_lsq,
            Self::PhysReg => &mut stats.stalls_phys_reg,
            Self::RetOperand => &mut stats.stalls_ret_operand,
        };
        *counter += 1;
    }
}

/// Executes the dispatch stage.
///
/// Returns the corrected fetch address when a `RET` resolves to a target other
/// than the one fetch predicted.
pub fn dispatch_stage(cpu: &mut Cpu, input: &mut Latch<DecodedInst>) -> Option<Word> {
    let decoded = *input.peek()?;

    let result = match decoded.inst.opcode {
        Opcode::Ret => dispatch_ret(cpu, &decoded),
        Opcode::Halt => dispatch_halt(cpu, &decoded),
        _ => dispatch_general(cpu, &decoded).map(|()| None),
    };
    match result {
        Ok(redirect) => {
            let _ = input.take();
            redirect
        }
        Err(cause) => {
            trace!(pc = decoded.pc, ?cause, "DP  stall");
            cause.record(&mut cpu.stats);
            input.stalled = true;
            None
        }
    }
}

/// First resource `decoded` needs that is unavailable.
fn missing_resource(cpu: &Cpu, decoded: &DecodedInst) -> Option<StallCause> {
    let info = decoded.info;
    if cpu.rob.is_full() {
        Some(StallCause::Rob)
    } else if info.fu.is_some() && cpu.iq.is_full() {
        Some(StallCause::IssueQueue)
    } else if info.mem.is_some() && cpu.lsq.is_full() {
        Some(StallCause::Lsq)
    } else if (info.writes_rd || info.writes_cc) && cpu.free_list.is_empty() {
        Some(StallCause::PhysReg)
    } else {
        None
    }
}

fn read_source(cpu: &Cpu, inst: &Instruction, source: Source) -> Operand {
    match source {
        Source::None => Operand::ready(0),
        Source::Rs1 => cpu.read_operand(inst.rs1),
        Source::Rs2 => cpu.read_operand(inst.rs2),
        Source::Cc => cpu.read_operand(cpu.rename.cc_index()),
    }
}

fn dispatch_general(cpu: &mut Cpu, decoded: &DecodedInst) -> Result<(), StallCause> {
    if let Some(cause) = missing_resource(cpu, decoded) {
        return Err(cause);
    }
    let DecodedInst { pc, inst, info, pred_next_pc } = *decoded;

    let src1 = read_source(cpu, &inst, info.src1);
    let src2 = read_source(cpu, &inst, info.src2);
    let store_data = if info.store_data {
        cpu.read_operand(inst.rs1)
    } else {
        Operand::ready(0)
    };

    let dest = if info.writes_rd || info.writes_cc {
        cpu.free_list.allocate()
    } else {
        None
    };
    let entry = RobEntry {
        rd: info.writes_rd.then_some(inst.rd),
        writes_cc: info.writes_cc,
        phys: dest,
        ..RobEntry::new(pc, inst.opcode)
    };
    let Some(rob_index) = cpu.rob.allocate(entry) else {
        if let Some(phys) = dest {
            cpu.free_list.release(phys);
        }
        return Err(StallCause::Rob);
    };

    if let Some(phys) = dest {
        cpu.prf.allocate(phys);
        if info.writes_rd {
            cpu.rename.rename(inst.rd, phys);
        }
        if info.writes_cc {
            let cc = cpu.rename.cc_index();
            cpu.rename.rename(cc, phys);
        }
    }

    let lsq_index = info.mem.and_then(|kind| {
        let slot = cpu.lsq.allocate(LsqEntry {
            pc,
            opcode: inst.opcode,
            kind,
            rob_index,
            dest: if kind == MemKind::Load { dest } else { None },
            address: None,
            data: store_data,
        });
        if slot.is_none() {
            error!(pc, rob_index, "LSQ allocation failed after capacity check");
        }
        slot
    });
    if let Some(entry) = cpu.rob.get_mut(rob_index) {
        entry.lsq_index = lsq_index;
    }

    if let Some(fu) = info.fu {
        let issued = cpu.iq.allocate(IqEntry {
            pc,
            opcode: inst.opcode,
            fu,
            rob_index,
            lsq_index,
            dest: if info.mem.is_some() { None } else { dest },
            src1,
            src2,
            imm: inst.imm,
            pred_next_pc,
            age: 0,
        });
        if issued.is_none() {
            error!(pc, rob_index, "IQ allocation failed after capacity check");
        }
    }

    if info.control_flow {
        let version = cpu.checkpoints.push(rob_index, pc, &cpu.rename, &cpu.btb);
        match version {
            Some(version) => trace!(pc, rob_index, version, "checkpoint saved"),
            None => error!(pc, rob_index, "checkpoint stack overflow"),
        }
    }

    debug!(
        pc,
        %inst,
        rob_index,
        phys = ?dest,
        lsq_index = ?lsq_index,
        "DP"
    );
    Ok(())
}

fn dispatch_halt(cpu: &mut Cpu, decoded: &DecodedInst) -> Result<Option<Word>, StallCause> {
    let entry = RobEntry {
        state: RobState::Completed,
        ..RobEntry::new(decoded.pc, Opcode::Halt)
    };
    let rob_index = cpu.rob.allocate(entry).ok_or(StallCause::Rob)?;
    debug!(pc = decoded.pc, rob_index, "DP  HALT");
    Ok(None)
}

fn dispatch_ret(cpu: &mut Cpu, decoded: &DecodedInst) -> Result<Option<Word>, StallCause> {
    if cpu.rob.is_full() {
        return Err(StallCause::Rob);
    }
    let operand = cpu.read_operand(decoded.inst.rs1);
    if !operand.ready {
        return Err(StallCause::RetOperand);
    }
    let target = operand.value;

    let entry = RobEntry {
        state: RobState::Completed,
        result: target,
        ..RobEntry::new(decoded.pc, Opcode::Ret)
    };
    let rob_index = cpu.rob.allocate(entry).ok_or(StallCause::Rob)?;

    cpu.btb.update(decoded.pc, target, true);
    cpu.branch_unresolved = false;

    if target == decoded.pred_next_pc {
        cpu.stats.branch_predictions += 1;
        debug!(pc = decoded.pc, rob_index, target, "DP  RET");
        Ok(None)
    } else {
        cpu.stats.branch_mispredictions += 1;
        debug!(
            pc = decoded.pc,
            rob_index,
            target,
            predicted = decoded.pred_next_pc,
            "DP  RET redirect"
        );
        Ok(Some(target))
    }
}
