//! Memory unit and data memory.
//!
//! This module provides the data side of the machine:
//! 1. **Data Memory:** A flat array of words addressed from zero, with bounds checks.
//! 2. **Memory Unit:** A single non-pipelined unit that holds one access for
//!    a fixed number of cycles before reading or writing data memory.

use crate::common::constants::{MEMORY_LATENCY, Word};
use crate::common::error::SimError;
use crate::core::arch::Flags;
use crate::core::pipeline::latches::ResultPacket;
use crate::core::rename::PhysReg;
use crate::isa::{MemKind, Opcode};

/// Flat word-addressed data memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<Word>,
}

impl DataMemory {
    /// Creates `size` zeroed words.
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![0; size],
        }
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True for a memory with no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Converts an effective address to a word index.
    ///
    /// # Errors
    ///
    /// [`SimError::AddressOutOfBounds`] if `address` is negative or past the end.
    pub fn check(&self, pc: Word, address: Word) -> Result<usize, SimError> {
        usize::try_from(address)
            .ok()
            .filter(|idx| *idx < self.words.len())
            .ok_or(SimError::AddressOutOfBounds {
                pc,
                address: i64::from(address),
                size: self.words.len(),
            })
    }

    /// Word at `idx`, or zero past the end.
    pub fn read(&self, idx: usize) -> Word {
        self.words.get(idx).copied().unwrap_or_default()
    }

    /// Writes `value` at `idx`; ignored past the end.
    pub fn write(&mut self, idx: usize, value: Word) {
        if let Some(word) = self.words.get_mut(idx) {
            *word = value;
        }
    }

    /// All words.
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

/// An access accepted by the memory unit.
#[derive(Clone, Copy, Debug)]
pub struct MemAccess {
    /// Program counter of the instruction.
    pub pc: Word,
    /// Operation.
    pub opcode: Opcode,
    /// Load or store.
    pub kind: MemKind,
    /// ROB slot of the instruction.
    pub rob_index: usize,
    /// Bounds-checked word index.
    pub address: usize,
    /// Value to write, for stores.
    pub store_value: Word,
    /// Destination physical register, for loads.
    pub dest: Option<PhysReg>,
}

/// Non-pipelined memory unit.
#[derive(Clone, Debug, Default)]
pub struct MemoryUnit {
    /// Access in progress and the cycles left before it completes.
    busy: Option<(MemAccess, u8)>,
}

impl MemoryUnit {
    /// Creates an idle unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while an access is in progress.
    pub const fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    /// Accepts an access; it completes after the unit's latency.
    pub fn start(&mut self, access: MemAccess) {
        debug_assert!(self.busy.is_none(), "memory unit overrun");
        self.busy = Some((access, MEMORY_LATENCY));
    }

    /// Advances the access in progress, performing it on its last cycle.
    pub fn tick(&mut self, memory: &mut DataMemory) -> Option<ResultPacket> {
        let (access, remaining) = self.busy.as_mut()?;
        *remaining -= 1;
        if *remaining > 0 {
            return None;
        }
        let access = *access;
        self.busy = None;

        let value = match access.kind {
            MemKind::Load => memory.read(access.address),
            MemKind::Store => {
                memory.write(access.address, access.store_value);
                access.store_value
            }
        };
        Some(ResultPacket {
            pc: access.pc,
            opcode: access.opcode,
            rob_index: access.rob_index,
            lsq_index: None,
            dest: access.dest,
            value,
            flags: Flags::from_result(value),
            branch: None,
            fault: None,
        })
    }

    /// Abandons the access in progress if its ROB slot is squashed.
    pub fn squash(&mut self, is_squashed: impl Fn(usize) -> bool) {
        if self.busy.is_some_and(|(access, _)| is_squashed(access.rob_index)) {
            self.busy = None;
        }
    }

    /// The access in progress.
    pub fn current(&self) -> Option<&MemAccess> {
        self.busy.as_ref().map(|(access, _)| access)
    }
}
