//! Decoded instructions.
//!
//! The core consumes an already-decoded stream. This module provides:
//! 1. **Raw Records:** `RawInstruction`, the external `(opcode, rd, rs1, rs2, imm)`
//!    tuple as produced by a program loader.
//! 2. **Validated Instructions:** `Instruction`, whose opcode is known and whose
//!    used register fields are inside the architectural register file.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::opcode::{Opcode, Source};
use crate::common::constants::Word;
use crate::common::error::SimError;

/// Undecoded instruction record.
///
/// Register fields are signed so that a loader's "unused" markers (commonly `-1`)
/// survive until validation, which only inspects the fields an opcode reads or writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawInstruction {
    /// Numeric opcode.
    pub opcode: u8,
    /// Destination register field.
    #[serde(default)]
    pub rd: i64,
    /// First source register field.
    #[serde(default)]
    pub rs1: i64,
    /// Second source register field.
    #[serde(default)]
    pub rs2: i64,
    /// Immediate / literal.
    #[serde(default)]
    pub imm: Word,
}

/// A validated instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// Destination register.
    pub rd: usize,
    /// First source register.
    pub rs1: usize,
    /// Second source register.
    pub rs2: usize,
    /// Immediate / literal.
    pub imm: Word,
}

impl Instruction {
    /// Builds an instruction without validation.
    pub const fn new(opcode: Opcode, rd: usize, rs1: usize, rs2: usize, imm: Word) -> Self {
        Self {
            opcode,
            rd,
            rs1,
            rs2,
            imm,
        }
    }

    /// Decodes and validates a raw record at program position `index`.
    ///
    /// Fields the opcode does not use are zeroed.
    pub fn decode(raw: &RawInstruction, index: usize, arch_regs: usize) -> Result<Self, SimError> {
        let opcode = Opcode::try_from(raw.opcode)?;
        let info = opcode.info();
        let reads = |field: Source| info.src1 == field || info.src2 == field;
        let uses_rs1 = reads(Source::Rs1) || info.store_data;
        let uses_rs2 = reads(Source::Rs2);

        let check = |used: bool, reg: i64| -> Result<usize, SimError> {
            if !used {
                return Ok(0);
            }
            usize::try_from(reg)
                .ok()
                .filter(|r| *r < arch_regs)
                .ok_or(SimError::RegisterOutOfRange {
                    index,
                    reg,
                    limit: arch_regs,
                })
        };

        Ok(Self {
            opcode,
            rd: check(info.writes_rd, raw.rd)?,
            rs1: check(uses_rs1, raw.rs1)?,
            rs2: check(uses_rs2, raw.rs2)?,
            imm: raw.imm,
        })
    }

    /// Checks an already-built instruction against the register file size.
    pub fn validate(&self, index: usize, arch_regs: usize) -> Result<(), SimError> {
        let raw = RawInstruction {
            opcode: self.opcode.info().code,
            rd: self.rd as i64,
            rs1: self.rs1 as i64,
            rs2: self.rs2 as i64,
            imm: self.imm,
        };
        Self::decode(&raw, index, arch_regs).map(|_| ())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.opcode.mnemonic();
        match self.opcode {
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor => write!(f, "{m} R{},R{},R{}", self.rd, self.rs1, self.rs2),
            Opcode::Addl | Opcode::Subl | Opcode::Load | Opcode::Jalr => {
                write!(f, "{m} R{},R{},#{}", self.rd, self.rs1, self.imm)
            }
            Opcode::Store => write!(f, "{m} R{},R{},#{}", self.rs1, self.rs2, self.imm),
            Opcode::Movc => write!(f, "{m} R{},#{}", self.rd, self.imm),
            Opcode::Cmp => write!(f, "{m} R{},R{}", self.rs1, self.rs2),
            Opcode::Jump => write!(f, "{m} R{},#{}", self.rs1, self.imm),
            Opcode::Ret => write!(f, "{m} R{}", self.rs1),
            Opcode::Bz | Opcode::Bnz | Opcode::Bp | Opcode::Bnp => write!(f, "{m} #{}", self.imm),
            Opcode::Halt => f.write_str(m),
        }
    }
}
