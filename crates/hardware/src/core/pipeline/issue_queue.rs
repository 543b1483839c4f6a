//! Issue Queue (IQ).
//!
//! Unordered pool of dispatched instructions waiting for their operands. Each
//! cycle, per functional unit class, every waiting entry of that class ages by
//! one and the oldest entry whose sources are both ready is removed and issued.

use crate::common::constants::Word;
use crate::core::pipeline::latches::{ExecPacket, Operand};
use crate::core::rename::PhysReg;
use crate::isa::{FuClass, Opcode};

/// One IQ entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IqEntry {
    /// Program counter of the instruction.
    pub pc: Word,
    /// Operation.
    pub opcode: Opcode,
    /// Unit the entry issues to.
    pub fu: FuClass,
    /// ROB slot of the instruction.
    pub rob_index: usize,
    /// LSQ slot for memory instructions.
    pub lsq_index: Option<usize>,
    /// Destination physical register.
    pub dest: Option<PhysReg>,
    /// First source.
    pub src1: Operand,
    /// Second source.
    pub src2: Operand,
    /// Immediate / literal.
    pub imm: Word,
    /// Next fetch address chosen by the predictor.
    pub pred_next_pc: Word,
    /// Cycles spent waiting for selection.
    pub age: u32,
}

impl IqEntry {
    /// Both sources are available.
    #[inline]
    pub const fn is_ready(&self) -> bool {
        self.src1.ready && self.src2.ready
    }

    /// The packet handed to the functional unit.
    pub const fn to_packet(&self) -> ExecPacket {
        ExecPacket {
            pc: self.pc,
            opcode: self.opcode,
            rob_index: self.rob_index,
            lsq_index: self.lsq_index,
            dest: self.dest,
            src1: self.src1.value,
            src2: self.src2.value,
            imm: self.imm,
            pred_next_pc: self.pred_next_pc,
        }
    }
}

/// Issue queue with a fixed number of slots.
#[derive(Clone, Debug)]
pub struct IssueQueue {
    slots: Vec<Option<IqEntry>>,
}

impl IssueQueue {
    /// Creates an empty queue with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// True when every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Places an entry in the first free slot.
    pub fn allocate(&mut self, entry: IqEntry) -> Option<usize> {
        let idx = self.slots.iter().position(Option::is_none)?;
        self.slots[idx] = Some(IqEntry { age: 0, ..entry });
        Some(idx)
    }

    /// Ages every `fu` entry, then removes and returns the oldest ready one.
    ///
    /// Ties go to the lowest slot.
    pub fn select(&mut self, fu: FuClass) -> Option<IqEntry> {
        let mut best: Option<(usize, u32)> = None;
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            let Some(entry) = slot.as_mut().filter(|e| e.fu == fu) else {
                continue;
            };
            entry.age = entry.age.saturating_add(1);
            if entry.is_ready() && best.is_none_or(|(_, age)| entry.age > age) {
                best = Some((idx, entry.age));
            }
        }
        let (idx, _) = best?;
        self.slots[idx].take()
    }

    /// Delivers a broadcast result to every operand waiting on `tag`.
    pub fn wake(&mut self, tag: PhysReg, value: Word) {
        for entry in self.slots.iter_mut().flatten() {
            let _ = entry.src1.wake(tag, value);
            let _ = entry.src2.wake(tag, value);
        }
    }

    /// Removes every entry whose ROB slot is squashed; returns how many.
    pub fn squash(&mut self, is_squashed: impl Fn(usize) -> bool) -> usize {
        let mut removed = 0;
        for slot in &mut self.slots {
            if slot.is_some_and(|e| is_squashed(e.rob_index)) {
                *slot = None;
                removed += 1;
            }
        }
        removed
    }

    /// Occupied `(slot, entry)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &IqEntry)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, s)| s.as_ref().map(|e| (idx, e)))
    }
}
