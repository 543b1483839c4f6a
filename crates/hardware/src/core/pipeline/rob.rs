//! Reorder Buffer (ROB) for in-order commit.
//!
//! The ROB is a circular buffer that tracks in-flight instructions from dispatch
//! through commit. It provides:
//! 1. **Allocation:** Assigns a slot index to each dispatched instruction; other
//!    structures refer to the instruction by that index.
//! 2. **Completion:** Marks instructions done when their results are available.
//! 3. **In-order Commit:** Retires instructions from the head in program order.
//! 4. **Flush:** Squashes every entry younger than a mispredicted branch.

use crate::common::constants::Word;
use crate::common::error::SimError;
use crate::common::ring::RingBuffer;
use crate::core::arch::Flags;
use crate::core::rename::PhysReg;
use crate::isa::{InsnClass, Opcode};

/// Lifecycle state of an ROB entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RobState {
    /// Entry allocated but instruction not yet finished executing.
    #[default]
    Issued,
    /// Execution complete, result available, waiting to commit.
    Completed,
    /// Instruction faulted; the fault is raised when it reaches the ROB head.
    Faulted,
}

/// A single entry in the Reorder Buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RobEntry {
    /// Program counter of the instruction.
    pub pc: Word,
    /// Operation.
    pub opcode: Opcode,
    /// Class tag.
    pub class: InsnClass,
    /// Architectural destination register, if the instruction writes one.
    pub rd: Option<usize>,
    /// Instruction also writes the condition-code alias.
    pub writes_cc: bool,
    /// Physical register allocated at dispatch.
    pub phys: Option<PhysReg>,
    /// LSQ slot for memory instructions.
    pub lsq_index: Option<usize>,
    /// Current lifecycle state.
    pub state: RobState,
    /// Computed result value.
    pub result: Word,
    /// Flags of `result`.
    pub flags: Flags,
    /// Fault to raise at commit, if faulted.
    pub fault: Option<SimError>,
}

impl RobEntry {
    /// A fresh entry awaiting execution.
    pub fn new(pc: Word, opcode: Opcode) -> Self {
        Self {
            pc,
            opcode,
            class: opcode.info().class,
            rd: None,
            writes_cc: false,
            phys: None,
            lsq_index: None,
            state: RobState::Issued,
            result: 0,
            flags: Flags::default(),
            fault: None,
        }
    }
}

/// Reorder Buffer: circular buffer for in-order commit.
#[derive(Clone, Debug)]
pub struct Rob {
    ring: RingBuffer<RobEntry>,
}

impl Rob {
    /// Creates a new ROB with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: RingBuffer::new(capacity),
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns true if the ROB is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Allocates an entry at the tail. Returns `None` if the ROB is full.
    pub fn allocate(&mut self, entry: RobEntry) -> Option<usize> {
        self.ring.push_back(entry).ok()
    }

    /// Marks an entry as completed with its result.
    pub fn complete(&mut self, idx: usize, result: Word, flags: Flags) {
        if let Some(entry) = self.ring.get_mut(idx) {
            entry.result = result;
            entry.flags = flags;
            entry.state = RobState::Completed;
        }
    }

    /// Marks an entry as faulted.
    pub fn fault(&mut self, idx: usize, fault: SimError) {
        if let Some(entry) = self.ring.get_mut(idx) {
            entry.fault = Some(fault);
            entry.state = RobState::Faulted;
        }
    }

    /// Slot index of the oldest entry.
    #[inline]
    pub fn head_index(&self) -> Option<usize> {
        self.ring.head_index()
    }

    /// Returns the oldest entry without removing it.
    pub fn peek_head(&self) -> Option<&RobEntry> {
        self.ring.front()
    }

    /// Removes the head entry if it is no longer `Issued`.
    ///
    /// Returns the slot index and the entry.
    pub fn commit_head(&mut self) -> Option<(usize, RobEntry)> {
        let idx = self.ring.head_index()?;
        if self.ring.front()?.state == RobState::Issued {
            return None;
        }
        self.ring.pop_front().map(|entry| (idx, entry))
    }

    /// Removes every entry younger than slot `idx`, returning them oldest first.
    pub fn flush_after(&mut self, idx: usize) -> Vec<(usize, RobEntry)> {
        self.ring.truncate_after(idx)
    }

    /// Entry in slot `idx`, if occupied.
    pub fn get(&self, idx: usize) -> Option<&RobEntry> {
        self.ring.get(idx)
    }

    /// Mutable access to the entry in slot `idx`.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut RobEntry> {
        self.ring.get_mut(idx)
    }

    /// Distance of slot `idx` from the head.
    pub fn age_of(&self, idx: usize) -> Option<usize> {
        self.ring.age_of(idx)
    }

    /// Iterates over `(slot, entry)` pairs from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RobEntry)> + '_ {
        self.ring.iter()
    }
}
