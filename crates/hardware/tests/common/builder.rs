//! Instruction constructors mirroring assembly syntax.
//!
//! `add(1, 2, 3)` is `ADD R1,R2,R3`; `store(1, 2, 8)` is `STORE R1,R2,#8`.

use oosim_core::common::Word;
use oosim_core::isa::{Instruction, Opcode};

fn rrr(op: Opcode, rd: usize, rs1: usize, rs2: usize) -> Instruction {
    Instruction::new(op, rd, rs1, rs2, 0)
}

fn rri(op: Opcode, rd: usize, rs1: usize, imm: Word) -> Instruction {
    Instruction::new(op, rd, rs1, 0, imm)
}

pub fn add(rd: usize, rs1: usize, rs2: usize) -> Instruction {
    rrr(Opcode::Add, rd, rs1, rs2)
}

pub fn sub(rd: usize, rs1: usize, rs2: usize) -> Instruction {
    rrr(Opcode::Sub, rd, rs1, rs2)
}

pub fn mul(rd: usize, rs1: usize, rs2: usize) -> Instruction {
    rrr(Opcode::Mul, rd, rs1, rs2)
}

pub fn div(rd: usize, rs1: usize, rs2: usize) -> Instruction {
    rrr(Opcode::Div, rd, rs1, rs2)
}

pub fn and(rd: usize, rs1: usize, rs2: usize) -> Instruction {
    rrr(Opcode::And, rd, rs1, rs2)
}

pub fn or(rd: usize, rs1: usize, rs2: usize) -> Instruction {
    rrr(Opcode::Or, rd, rs1, rs2)
}

pub fn xor(rd: usize, rs1: usize, rs2: usize) -> Instruction {
    rrr(Opcode::Xor, rd, rs1, rs2)
}

pub fn movc(rd: usize, imm: Word) -> Instruction {
    Instruction::new(Opcode::Movc, rd, 0, 0, imm)
}

pub fn addl(rd: usize, rs1: usize, imm: Word) -> Instruction {
    rri(Opcode::Addl, rd, rs1, imm)
}

pub fn subl(rd: usize, rs1: usize, imm: Word) -> Instruction {
    rri(Opcode::Subl, rd, rs1, imm)
}

pub fn load(rd: usize, rs1: usize, imm: Word) -> Instruction {
    rri(Opcode::Load, rd, rs1, imm)
}

/// `STORE Rsrc,Rbase,#imm`: `MEM[Rbase + imm] = Rsrc`.
pub fn store(src: usize, base: usize, imm: Word) -> Instruction {
    Instruction::new(Opcode::Store, 0, src, base, imm)
}

pub fn cmp(rs1: usize, rs2: usize) -> Instruction {
    Instruction::new(Opcode::Cmp, 0, rs1, rs2, 0)
}

pub fn bz(imm: Word) -> Instruction {
    Instruction::new(Opcode::Bz, 0, 0, 0, imm)
}

pub fn bnz(imm: Word) -> Instruction {
    Instruction::new(Opcode::Bnz, 0, 0, 0, imm)
}

pub fn bp(imm: Word) -> Instruction {
    Instruction::new(Opcode::Bp, 0, 0, 0, imm)
}

pub fn bnp(imm: Word) -> Instruction {
    Instruction::new(Opcode::Bnp, 0, 0, 0, imm)
}

pub fn jump(rs1: usize, imm: Word) -> Instruction {
    Instruction::new(Opcode::Jump, 0, rs1, 0, imm)
}

pub fn jalr(rd: usize, rs1: usize, imm: Word) -> Instruction {
    rri(Opcode::Jalr, rd, rs1, imm)
}

pub fn ret(rs1: usize) -> Instruction {
    Instruction::new(Opcode::Ret, 0, rs1, 0, 0)
}

pub fn halt() -> Instruction {
    Instruction::new(Opcode::Halt, 0, 0, 0, 0)
}
