//! Structural invariant checks.
//!
//! These are the properties a rollback or retire bug would break long before
//! it showed up in architectural results: register conservation, rename
//! table consistency, queue bounds and checkpoint depth. They are checked on
//! demand, never on the stepping path.

use thiserror::Error;

use crate::core::Cpu;
use crate::core::rename::{PhysReg, RegSource};

/// A broken structural invariant.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A register appears twice on the free list.
    #[error("{0} appears on the free list more than once")]
    DuplicateFree(PhysReg),

    /// A register is owned by more than one ROB entry, or by one and the free list.
    #[error("{0} is owned twice")]
    DoubleOwned(PhysReg),

    /// A register is neither free nor owned by a ROB entry.
    #[error("{0} leaked: neither free nor owned")]
    Leaked(PhysReg),

    /// A PRF-sourced rename slot points at a register no ROB entry owns.
    #[error("rename slot {slot} reads {phys}, which no in-flight instruction owns")]
    StaleMapping {
        /// Rename-table slot.
        slot: usize,
        /// Register it maps to.
        phys: PhysReg,
    },

    /// A rename slot disagrees with its most recent instance.
    #[error("rename slot {slot} maps {mapped:?} but most recent instance is {most_recent:?}")]
    MriMismatch {
        /// Rename-table slot.
        slot: usize,
        /// Current mapping.
        mapped: Option<PhysReg>,
        /// MRI entry.
        most_recent: Option<PhysReg>,
    },

    /// A queue holds more entries than its capacity.
    #[error("{name} holds {len} entries, capacity {capacity}")]
    Overfull {
        /// Queue name.
        name: &'static str,
        /// Occupied entries.
        len: usize,
        /// Capacity.
        capacity: usize,
    },

    /// More than one checkpoint is live.
    #[error("{0} checkpoints live; at most one branch may be unresolved")]
    CheckpointDepth(usize),

    /// A checkpoint names a ROB slot that holds no control-flow instruction.
    #[error("checkpoint for ROB slot {0} has no matching branch")]
    OrphanCheckpoint(usize),
}

/// Runs every check against `cpu`.
///
/// # Errors
///
/// Returns the first violation found.
pub fn check(cpu: &Cpu) -> Result<(), InvariantViolation> {
    check_conservation(cpu)?;
    check_rename(cpu)?;
    check_bounds(cpu)?;
    check_checkpoints(cpu)
}

fn check_conservation(cpu: &Cpu) -> Result<(), InvariantViolation> {
    let mut seen = vec![false; cpu.prf.len()];
    for reg in cpu.free_list.iter() {
        if std::mem::replace(&mut seen[reg.0], true) {
            return Err(InvariantViolation::DuplicateFree(reg));
        }
    }
    for (_, entry) in cpu.rob.iter() {
        if let Some(reg) = entry.phys
            && std::mem::replace(&mut seen[reg.0], true)
        {
            return Err(InvariantViolation::DoubleOwned(reg));
        }
    }
    match seen.iter().position(|owned| !owned) {
        Some(idx) => Err(InvariantViolation::Leaked(PhysReg(idx))),
        None => Ok(()),
    }
}

fn check_rename(cpu: &Cpu) -> Result<(), InvariantViolation> {
    for slot in 0..cpu.rename.len() {
        let entry = cpu.rename.lookup(slot);
        let most_recent = cpu.rename.most_recent(slot);
        if entry.phys != most_recent {
            return Err(InvariantViolation::MriMismatch {
                slot,
                mapped: entry.phys,
                most_recent,
            });
        }
        if entry.source == RegSource::Prf
            && let Some(phys) = entry.phys
            && !cpu.rob.iter().any(|(_, e)| e.phys == Some(phys))
        {
            return Err(InvariantViolation::StaleMapping { slot, phys });
        }
    }
    Ok(())
}

fn check_bounds(cpu: &Cpu) -> Result<(), InvariantViolation> {
    let queues = [
        ("issue queue", cpu.iq.len(), cpu.iq.capacity()),
        ("load/store queue", cpu.lsq.len(), cpu.lsq.capacity()),
        ("reorder buffer", cpu.rob.len(), cpu.rob.capacity()),
    ];
    match queues.into_iter().find(|(_, len, capacity)| len > capacity) {
        Some((name, len, capacity)) => Err(InvariantViolation::Overfull {
            name,
            len,
            capacity,
        }),
        None => Ok(()),
    }
}

fn check_checkpoints(cpu: &Cpu) -> Result<(), InvariantViolation> {
    if cpu.checkpoints.len() > 1 {
        return Err(InvariantViolation::CheckpointDepth(cpu.checkpoints.len()));
    }
    if let Some(cp) = cpu.checkpoints.top() {
        let is_branch = cpu
            .rob
            .get(cp.rob_index)
            .is_some_and(|e| e.opcode.info().control_flow && e.pc == cp.pc);
        if !is_branch {
            return Err(InvariantViolation::OrphanCheckpoint(cp.rob_index));
        }
        if !cpu.branch_unresolved {
            return Err(InvariantViolation::OrphanCheckpoint(cp.rob_index));
        }
    }
    Ok(())
}
