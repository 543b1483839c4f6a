//! Program image held in code memory.

use serde::Serialize;

use super::instruction::{Instruction, RawInstruction};
use crate::common::constants::{INSTRUCTION_WIDTH, Word};
use crate::common::error::SimError;

/// A validated, read-only instruction sequence addressed from `base`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Program {
    base: Word,
    instructions: Vec<Instruction>,
}

impl Program {
    /// Validates `instructions` against an architectural register file of `arch_regs`.
    pub fn new(base: Word, instructions: Vec<Instruction>, arch_regs: usize) -> Result<Self, SimError> {
        for (index, inst) in instructions.iter().enumerate() {
            inst.validate(index, arch_regs)?;
        }
        Ok(Self { base, instructions })
    }

    /// Decodes a raw record stream.
    pub fn from_raw(base: Word, raw: &[RawInstruction], arch_regs: usize) -> Result<Self, SimError> {
        let instructions = raw
            .iter()
            .enumerate()
            .map(|(index, r)| Instruction::decode(r, index, arch_regs))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { base, instructions })
    }

    /// Address of the first instruction.
    pub const fn base(&self) -> Word {
        self.base
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True for an empty program.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Address of the instruction at `index`.
    pub fn address_of(&self, index: usize) -> Word {
        self.base.wrapping_add((index as Word).wrapping_mul(INSTRUCTION_WIDTH))
    }

    /// Instruction at `pc`, or `None` if `pc` is outside the image or misaligned.
    pub fn fetch(&self, pc: Word) -> Option<&Instruction> {
        let offset = i64::from(pc) - i64::from(self.base);
        let width = i64::from(INSTRUCTION_WIDTH);
        if offset < 0 || offset % width != 0 {
            return None;
        }
        usize::try_from(offset / width)
            .ok()
            .and_then(|idx| self.instructions.get(idx))
    }
}
