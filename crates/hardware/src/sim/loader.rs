//! Program loading.
//!
//! This module turns external program descriptions into instructions. It provides:
//! 1. **Assembly text:** One instruction per line in the form printed by
//!    `Instruction`'s `Display` (`ADD R1,R2,R3`, `MOVC R1,#5`, `BZ #8`).
//!    Blank lines and `;` comments are skipped; mnemonics ignore case.
//! 2. **JSON:** An array of raw `(opcode, rd, rs1, rs2, imm)` records.
//!
//! Register ranges are checked later, when the program image is built.

use crate::common::constants::Word;
use crate::common::error::SimError;
use crate::isa::{Instruction, Opcode, RawInstruction};

/// Parses an assembly listing.
///
/// # Examples
///
/// ```
/// use oosim_core::isa::Opcode;
/// use oosim_core::sim::loader::parse_program;
///
/// let program = parse_program("MOVC R1,#5 ; five\nADD R2,R1,R1\nHALT").unwrap();
/// assert_eq!(program.len(), 3);
/// assert_eq!(program[1].opcode, Opcode::Add);
/// assert_eq!(program[1].to_string(), "ADD R2,R1,R1");
/// ```
pub fn parse_program(text: &str) -> Result<Vec<Instruction>, SimError> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let code = line.split(';').next().unwrap_or_default().trim();
            (!code.is_empty()).then(|| parse_line(code, idx + 1))
        })
        .collect()
}

/// Parses a JSON array of raw instruction records.
pub fn parse_raw_json(json: &str) -> Result<Vec<RawInstruction>, SimError> {
    serde_json::from_str(json).map_err(|err| SimError::Syntax {
        line: err.line(),
        message: err.to_string(),
    })
}

/// Parses one non-empty instruction line.
pub fn parse_line(code: &str, line: usize) -> Result<Instruction, SimError> {
    let (mnemonic, rest) = code
        .split_once(char::is_whitespace)
        .map_or((code, ""), |(m, r)| (m, r.trim()));
    let opcode = Opcode::from_mnemonic(mnemonic)?;
    let operands: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',').map(str::trim).collect()
    };

    let syntax = |message: String| SimError::Syntax { line, message };
    let expect = |shape: &str, count: usize| {
        if operands.len() == count {
            Ok(())
        } else {
            Err(syntax(format!("{mnemonic} expects `{shape}`, found `{rest}`")))
        }
    };
    let reg = |idx: usize| register(operands[idx]).ok_or_else(|| syntax(format!("bad register `{}`", operands[idx])));
    let imm = |idx: usize| literal(operands[idx]).ok_or_else(|| syntax(format!("bad literal `{}`", operands[idx])));

    let inst = match opcode {
        Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::And | Opcode::Or | Opcode::Xor => {
            expect("Rd,Rs1,Rs2", 3)?;
            Instruction::new(opcode, reg(0)?, reg(1)?, reg(2)?, 0)
        }
        Opcode::Addl | Opcode::Subl | Opcode::Load | Opcode::Jalr => {
            expect("Rd,Rs1,#imm", 3)?;
            Instruction::new(opcode, reg(0)?, reg(1)?, 0, imm(2)?)
        }
        Opcode::Store => {
            expect("Rsrc,Rbase,#imm", 3)?;
            Instruction::new(opcode, 0, reg(0)?, reg(1)?, imm(2)?)
        }
        Opcode::Movc => {
            expect("Rd,#imm", 2)?;
            Instruction::new(opcode, reg(0)?, 0, 0, imm(1)?)
        }
        Opcode::Cmp => {
            expect("Rs1,Rs2", 2)?;
            Instruction::new(opcode, 0, reg(0)?, reg(1)?, 0)
        }
        Opcode::Jump => {
            expect("Rs1,#imm", 2)?;
            Instruction::new(opcode, 0, reg(0)?, 0, imm(1)?)
        }
        Opcode::Ret => {
            expect("Rs1", 1)?;
            Instruction::new(opcode, 0, reg(0)?, 0, 0)
        }
        Opcode::Bz | Opcode::Bnz | Opcode::Bp | Opcode::Bnp => {
            expect("#imm", 1)?;
            Instruction::new(opcode, 0, 0, 0, imm(0)?)
        }
        Opcode::Halt => {
            expect("", 0)?;
            Instruction::new(opcode, 0, 0, 0, 0)
        }
    };
    Ok(inst)
}

fn register(token: &str) -> Option<usize> {
    token.strip_prefix(['R', 'r'])?.parse().ok()
}

fn literal(token: &str) -> Option<Word> {
    token.strip_prefix('#')?.parse().ok()
}
