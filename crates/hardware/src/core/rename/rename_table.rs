//! Rename table and most-recent-instance map.
//!
//! Maps every architectural register (and the condition-code alias) to where
//! its newest value lives:
//! 1. **Source Flag:** `Arf` when the committed value is current, `Prf` when an
//!    in-flight producer owns a physical register.
//! 2. **MRI Map:** The physical register most recently allocated for the slot.
//!    Commit only hands a slot back to the ARF when the retiring register is
//!    still the most recent instance, so an older retirement never clobbers a
//!    newer rename.
//! 3. **Recovery:** Slots touched by squashed instructions are restored from a
//!    checkpointed copy.

use serde::Serialize;

use super::prf::PhysReg;

/// Where a slot's current value is read from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum RegSource {
    /// The architectural register file.
    #[default]
    Arf,
    /// The mapped physical register.
    Prf,
}

/// One rename table slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RenameEntry {
    /// Mapped physical register, if the slot has ever been renamed.
    pub phys: Option<PhysReg>,
    /// Which file holds the current value.
    pub source: RegSource,
}

impl RenameEntry {
    /// The in-flight producer, if the value must come from the PRF.
    #[inline]
    pub fn producer(&self) -> Option<PhysReg> {
        match self.source {
            RegSource::Prf => self.phys,
            RegSource::Arf => None,
        }
    }
}

/// Rename table plus MRI map, one slot per architectural register and one for
/// the condition-code alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameTable {
    entries: Vec<RenameEntry>,
    mri: Vec<Option<PhysReg>>,
}

impl RenameTable {
    /// Creates a table for `arch_regs` registers plus the alias, all sourced from the ARF.
    pub fn new(arch_regs: usize) -> Self {
        Self {
            entries: vec![RenameEntry::default(); arch_regs + 1],
            mri: vec![None; arch_regs + 1],
        }
    }

    /// Number of slots, including the alias.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a table with no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slot of the condition-code alias.
    #[inline]
    pub fn cc_index(&self) -> usize {
        self.entries.len() - 1
    }

    /// Current mapping of `slot`.
    #[inline]
    pub fn lookup(&self, slot: usize) -> RenameEntry {
        self.entries[slot]
    }

    /// Most recent physical instance of `slot`.
    #[inline]
    pub fn most_recent(&self, slot: usize) -> Option<PhysReg> {
        self.mri[slot]
    }

    /// Points `slot` at a freshly allocated producer.
    pub fn rename(&mut self, slot: usize, phys: PhysReg) {
        self.entries[slot] = RenameEntry {
            phys: Some(phys),
            source: RegSource::Prf,
        };
        self.mri[slot] = Some(phys);
    }

    /// Hands `slot` back to the ARF, but only if `phys` is still its most recent instance.
    ///
    /// Returns true when the slot was switched.
    pub fn retire_if_current(&mut self, slot: usize, phys: PhysReg) -> bool {
        if self.mri[slot] == Some(phys) {
            self.entries[slot].source = RegSource::Arf;
            true
        } else {
            false
        }
    }

    /// Restores every slot whose most recent instance was squashed.
    ///
    /// Slots restored to a register that has since been freed read from the ARF.
    pub fn restore_squashed(
        &mut self,
        saved: &Self,
        is_squashed: impl Fn(PhysReg) -> bool,
        is_free: impl Fn(PhysReg) -> bool,
    ) {
        for slot in 0..self.entries.len() {
            let Some(current) = self.mri[slot] else {
                continue;
            };
            if !is_squashed(current) {
                continue;
            }
            self.entries[slot] = saved.entries[slot];
            self.mri[slot] = saved.mri[slot];
            if self.entries[slot].producer().is_some_and(&is_free) {
                self.entries[slot].source = RegSource::Arf;
            }
        }
    }

    /// Slots and their mappings in index order.
    pub fn entries(&self) -> &[RenameEntry] {
        &self.entries
    }
}
