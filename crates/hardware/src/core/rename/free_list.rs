//! Free list of physical registers.

use tracing::error;

use super::prf::PhysReg;
use crate::common::ring::RingBuffer;

/// FIFO of unallocated physical registers.
#[derive(Clone, Debug)]
pub struct FreeList {
    ring: RingBuffer<PhysReg>,
}

impl FreeList {
    /// Creates a free list holding every one of `count` physical registers.
    pub fn new(count: usize) -> Self {
        let mut ring = RingBuffer::new(count);
        for idx in 0..count {
            if ring.push_back(PhysReg(idx)).is_err() {
                break;
            }
        }
        Self { ring }
    }

    /// Takes the next free register.
    pub fn allocate(&mut self) -> Option<PhysReg> {
        self.ring.pop_front()
    }

    /// Returns a register to the list.
    pub fn release(&mut self, reg: PhysReg) {
        debug_assert!(!self.ring.contains(&reg), "{reg} released twice");
        if self.ring.push_back(reg).is_err() {
            error!(%reg, "free list overflow");
        }
    }

    /// Number of free registers.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// True when no register is free.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// True if `reg` is free.
    pub fn contains(&self, reg: PhysReg) -> bool {
        self.ring.contains(&reg)
    }

    /// Free registers in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = PhysReg> + '_ {
        self.ring.iter().map(|(_, reg)| *reg)
    }
}
