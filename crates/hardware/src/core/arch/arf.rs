//! Architectural Register File.
//!
//! Holds the committed machine state. It performs the following:
//! 1. **Storage:** One value per architectural register plus a trailing
//!    condition-code alias slot, each carrying the flags of its value.
//! 2. **Retirement:** Only the commit stage writes here, in program order.

use serde::Serialize;

use super::flags::Flags;
use crate::common::constants::Word;

/// One committed register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ArchReg {
    /// Committed value.
    pub value: Word,
    /// Flags of `value`.
    pub flags: Flags,
}

/// Architectural register file with a condition-code alias at index `arch_regs`.
#[derive(Clone, Debug)]
pub struct ArchRegFile {
    regs: Vec<ArchReg>,
}

impl ArchRegFile {
    /// Creates a register file of `arch_regs` general registers, all zero.
    ///
    /// The condition-code alias starts at zero with the zero flag set.
    pub fn new(arch_regs: usize) -> Self {
        let zero = ArchReg {
            value: 0,
            flags: Flags::from_result(0),
        };
        Self {
            regs: vec![zero; arch_regs + 1],
        }
    }

    /// Number of general registers, excluding the alias.
    #[inline]
    pub fn arch_regs(&self) -> usize {
        self.regs.len() - 1
    }

    /// Index of the condition-code alias.
    #[inline]
    pub fn cc_index(&self) -> usize {
        self.regs.len() - 1
    }

    /// Committed value of register `idx`.
    #[inline]
    pub fn read(&self, idx: usize) -> Word {
        self.regs[idx].value
    }

    /// Committed value and flags of register `idx`.
    #[inline]
    pub fn entry(&self, idx: usize) -> ArchReg {
        self.regs[idx]
    }

    /// Commits `value` to register `idx`.
    pub fn write(&mut self, idx: usize, value: Word) {
        self.regs[idx] = ArchReg {
            value,
            flags: Flags::from_result(value),
        };
    }

    /// Committed condition-code alias.
    #[inline]
    pub fn cc(&self) -> ArchReg {
        self.regs[self.cc_index()]
    }

    /// General registers in index order, excluding the alias.
    pub fn general(&self) -> &[ArchReg] {
        &self.regs[..self.arch_regs()]
    }
}
