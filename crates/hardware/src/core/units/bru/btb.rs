//! Branch Target Buffer (BTB).
//!
//! The BTB is a direct-mapped table that remembers, per control-flow
//! instruction, its target and last outcome. It allows the fetch stage to
//! redirect before the instruction is decoded. The whole table is copied into
//! each checkpoint so a squashed path cannot leave training behind.

use crate::common::constants::Word;

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct BtbEntry {
    /// Address of the instruction owning the entry.
    tag: Word,
    /// Predicted target address.
    target: Word,
    /// Outcome of the last resolution.
    taken: bool,
    /// Indicates if this entry contains valid data.
    valid: bool,
}

/// Branch Target Buffer structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Btb {
    /// The table of BTB entries.
    table: Vec<BtbEntry>,
}

impl Btb {
    /// Creates a Branch Target Buffer with `size` entries.
    pub fn new(size: usize) -> Self {
        Self {
            table: vec![BtbEntry::default(); size.max(1)],
        }
    }

    /// Word-aligned index: drops the low two address bits and wraps by table size.
    fn index(&self, pc: Word) -> usize {
        ((pc as u32 >> 2) as usize) % self.table.len()
    }

    fn entry(&self, pc: Word) -> Option<&BtbEntry> {
        let e = &self.table[self.index(pc)];
        (e.valid && e.tag == pc).then_some(e)
    }

    /// True if `pc` owns an entry.
    pub fn contains(&self, pc: Word) -> bool {
        self.entry(pc).is_some()
    }

    /// Predicted next fetch address for `pc`, if the entry predicts taken.
    pub fn predict(&self, pc: Word) -> Option<Word> {
        self.entry(pc).filter(|e| e.taken).map(|e| e.target)
    }

    /// Looks up the stored target regardless of the predicted direction.
    pub fn lookup(&self, pc: Word) -> Option<Word> {
        self.entry(pc).map(|e| e.target)
    }

    /// Creates a not-taken entry for `pc` unless it already owns one.
    pub fn reserve(&mut self, pc: Word, target: Word) {
        if !self.contains(pc) {
            self.update(pc, target, false);
        }
    }

    /// Records a resolved outcome for `pc`, replacing whatever occupied the slot.
    pub fn update(&mut self, pc: Word, target: Word, taken: bool) {
        let idx = self.index(pc);
        self.table[idx] = BtbEntry {
            tag: pc,
            target,
            taken,
            valid: true,
        };
    }
}
