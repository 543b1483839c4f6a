//! Physical Register File.
//!
//! Backing storage for renamed values. A register is written exactly once per
//! allocation, by the writeback stage, and its `valid` bit tells dispatch
//! whether a consumer can read the value or must wait for a broadcast.

use std::fmt;

use serde::Serialize;

use crate::common::constants::Word;
use crate::core::arch::Flags;

/// Index of a physical register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PhysReg(pub usize);

impl fmt::Display for PhysReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// One physical register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PhysEntry {
    /// Last written value.
    pub value: Word,
    /// Flags of `value`.
    pub flags: Flags,
    /// The value belongs to the current allocation.
    pub valid: bool,
}

/// Physical register file.
#[derive(Clone, Debug)]
pub struct PhysRegFile {
    regs: Vec<PhysEntry>,
}

impl PhysRegFile {
    /// Creates `count` registers, all invalid.
    pub fn new(count: usize) -> Self {
        Self {
            regs: vec![PhysEntry::default(); count],
        }
    }

    /// Number of physical registers.
    #[inline]
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// True when the file has no registers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Register contents.
    #[inline]
    pub fn entry(&self, reg: PhysReg) -> PhysEntry {
        self.regs[reg.0]
    }

    /// True once the current producer has written back.
    #[inline]
    pub fn is_valid(&self, reg: PhysReg) -> bool {
        self.regs[reg.0].valid
    }

    /// Invalidates `reg` for a new producer.
    pub fn allocate(&mut self, reg: PhysReg) {
        self.regs[reg.0].valid = false;
    }

    /// Writes back a result and marks it valid.
    pub fn write(&mut self, reg: PhysReg, value: Word, flags: Flags) {
        self.regs[reg.0] = PhysEntry {
            value,
            flags,
            valid: true,
        };
    }

    /// All registers in index order.
    pub fn entries(&self) -> &[PhysEntry] {
        &self.regs
    }
}
