//! Load/Store Queue (LSQ).
//!
//! Memory instructions enter the LSQ at dispatch in program order and leave
//! from the head, one at a time, into the memory unit. It provides:
//! 1. **Address Fill:** The integer unit's address generation result lands here.
//! 2. **Store Data Tracking:** A store's data operand has its own tag and ready
//!    bit, woken by the forwarding buses independently of its address.
//! 3. **Drain Rules:** A load leaves once its address is known. A store leaves
//!    once its address and data are known and it is the oldest instruction in
//!    the ROB, so memory is written only by non-speculative stores.

use crate::common::constants::Word;
use crate::common::ring::RingBuffer;
use crate::core::pipeline::latches::Operand;
use crate::core::rename::PhysReg;
use crate::isa::{MemKind, Opcode};

/// One LSQ entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LsqEntry {
    /// Program counter of the instruction.
    pub pc: Word,
    /// Operation.
    pub opcode: Opcode,
    /// Load or store.
    pub kind: MemKind,
    /// ROB slot of the instruction.
    pub rob_index: usize,
    /// Destination physical register, for loads.
    pub dest: Option<PhysReg>,
    /// Bounds-checked word address, once generated.
    pub address: Option<usize>,
    /// Store data; always ready for loads.
    pub data: Operand,
}

impl LsqEntry {
    /// Whether the entry may enter the memory unit, given the ROB head slot.
    pub fn can_drain(&self, rob_head: Option<usize>) -> bool {
        if self.address.is_none() {
            return false;
        }
        match self.kind {
            MemKind::Load => true,
            MemKind::Store => self.data.ready && rob_head == Some(self.rob_index),
        }
    }
}

/// Load/store queue.
#[derive(Clone, Debug)]
pub struct Lsq {
    ring: RingBuffer<LsqEntry>,
}

impl Lsq {
    /// Creates an empty queue with `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: RingBuffer::new(capacity),
        }
    }

    /// Queue capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Occupied entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// True when empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// True when full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Appends an entry. Returns `None` if the queue is full.
    pub fn allocate(&mut self, entry: LsqEntry) -> Option<usize> {
        self.ring.push_back(entry).ok()
    }

    /// Records the generated address of the entry in slot `idx`.
    pub fn set_address(&mut self, idx: usize, address: usize) {
        if let Some(entry) = self.ring.get_mut(idx) {
            entry.address = Some(address);
        }
    }

    /// Delivers a broadcast result to every store waiting on `tag`.
    pub fn wake(&mut self, tag: PhysReg, value: Word) {
        for (_, entry) in self.ring.iter_mut() {
            let _ = entry.data.wake(tag, value);
        }
    }

    /// Oldest entry.
    pub fn head(&self) -> Option<&LsqEntry> {
        self.ring.front()
    }

    /// Removes the oldest entry.
    pub fn pop_head(&mut self) -> Option<LsqEntry> {
        self.ring.pop_front()
    }

    /// Removes the squashed entries, which always form the youngest suffix.
    pub fn squash(&mut self, is_squashed: impl Fn(usize) -> bool) -> usize {
        self.ring.pop_back_while(|e| is_squashed(e.rob_index)).len()
    }

    /// Entry in slot `idx`.
    pub fn get(&self, idx: usize) -> Option<&LsqEntry> {
        self.ring.get(idx)
    }

    /// Iterates over `(slot, entry)` pairs from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LsqEntry)> + '_ {
        self.ring.iter()
    }
}
