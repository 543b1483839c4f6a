//! Speculation checkpoints.
//!
//! When a conditional branch, `JUMP` or `JALR` dispatches, the rename table,
//! MRI map and BTB are copied after the branch's own renaming. The copy is
//! popped and restored on a misprediction, or discarded when the branch
//! resolves as predicted. Only one branch may be unresolved at a time, so the
//! stack never grows past its limit of one.

use crate::common::constants::Word;
use crate::core::rename::RenameTable;
use crate::core::units::bru::Btb;

/// Snapshot of speculative front-end state at a branch.
#[derive(Clone, Debug)]
pub struct Checkpoint {
    /// Monotonic identifier of the checkpoint.
    pub version: u64,
    /// ROB slot of the branch that took the checkpoint.
    pub rob_index: usize,
    /// Address of that branch.
    pub pc: Word,
    /// Rename table and MRI map after the branch renamed.
    pub rename: RenameTable,
    /// Branch target buffer at dispatch.
    pub btb: Btb,
}

/// Bounded stack of checkpoints.
#[derive(Clone, Debug)]
pub struct CheckpointStack {
    stack: Vec<Checkpoint>,
    limit: usize,
    next_version: u64,
}

impl CheckpointStack {
    /// Creates an empty stack holding at most `limit` checkpoints.
    pub fn new(limit: usize) -> Self {
        Self {
            stack: Vec::with_capacity(limit),
            limit,
            next_version: 0,
        }
    }

    /// Saves a checkpoint for the branch in ROB slot `rob_index`.
    ///
    /// Returns the checkpoint's version, or `None` if the stack is full.
    pub fn push(&mut self, rob_index: usize, pc: Word, rename: &RenameTable, btb: &Btb) -> Option<u64> {
        if self.stack.len() >= self.limit {
            return None;
        }
        let version = self.next_version;
        self.next_version += 1;
        self.stack.push(Checkpoint {
            version,
            rob_index,
            pc,
            rename: rename.clone(),
            btb: btb.clone(),
        });
        Some(version)
    }

    /// Removes and returns the checkpoint taken by the branch in `rob_index`.
    pub fn take(&mut self, rob_index: usize) -> Option<Checkpoint> {
        let pos = self.stack.iter().rposition(|cp| cp.rob_index == rob_index)?;
        Some(self.stack.remove(pos))
    }

    /// Number of live checkpoints.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// True when no checkpoint is live.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The newest checkpoint.
    pub fn top(&self) -> Option<&Checkpoint> {
        self.stack.last()
    }
}
