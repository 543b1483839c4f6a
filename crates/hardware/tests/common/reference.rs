//! Sequential reference interpreter.
//!
//! Executes one instruction at a time with no pipelining, renaming or
//! speculation. The out-of-order core must leave exactly this architectural
//! state behind and retire exactly this sequence of addresses.

use oosim_core::common::{SimError, Word};
use oosim_core::common::constants::{CODE_BASE, INSTRUCTION_WIDTH};
use oosim_core::core::cpu::HaltReason;
use oosim_core::isa::{Instruction, Opcode};

/// Architectural machine executed in program order.
#[derive(Clone, Debug)]
pub struct Reference {
    program: Vec<Instruction>,
    pub regs: Vec<Word>,
    pub cc: Word,
    pub memory: Vec<Word>,
    pub pc: Word,
    /// Addresses of retired instructions, in order.
    pub trace: Vec<Word>,
}

impl Reference {
    pub fn new(program: &[Instruction], arch_regs: usize, data_words: usize) -> Self {
        Self {
            program: program.to_vec(),
            regs: vec![0; arch_regs],
            cc: 0,
            memory: vec![0; data_words],
            pc: CODE_BASE,
            trace: Vec::new(),
        }
    }

    /// Runs until a halt, a fault, or `max_steps` retirements.
    ///
    /// Returns `None` when the step budget runs out.
    pub fn run(&mut self, max_steps: usize) -> Option<Result<HaltReason, SimError>> {
        for _ in 0..max_steps {
            match self.step() {
                Ok(None) => {}
                Ok(Some(reason)) => return Some(Ok(reason)),
                Err(err) => return Some(Err(err)),
            }
        }
        None
    }

    fn fetch(&self) -> Option<Instruction> {
        let offset = i64::from(self.pc) - i64::from(CODE_BASE);
        let width = i64::from(INSTRUCTION_WIDTH);
        if offset < 0 || offset % width != 0 {
            return None;
        }
        usize::try_from(offset / width)
            .ok()
            .and_then(|idx| self.program.get(idx).copied())
    }

    fn address(&self, pc: Word, address: Word) -> Result<usize, SimError> {
        usize::try_from(address)
            .ok()
            .filter(|idx| *idx < self.memory.len())
            .ok_or(SimError::AddressOutOfBounds {
                pc,
                address: i64::from(address),
                size: self.memory.len(),
            })
    }

    /// Executes one instruction.
    pub fn step(&mut self) -> Result<Option<HaltReason>, SimError> {
        let Some(inst) = self.fetch() else {
            return Ok(Some(HaltReason::StreamExhausted));
        };
        let pc = self.pc;
        let fall_through = pc.wrapping_add(INSTRUCTION_WIDTH);
        let a = self.regs[inst.rs1];
        let b = self.regs[inst.rs2];
        let mut next = fall_through;

        let flag_result = match inst.opcode {
            Opcode::Add => Some(a.wrapping_add(b)),
            Opcode::Sub => Some(a.wrapping_sub(b)),
            Opcode::Mul => Some(a.wrapping_mul(b)),
            Opcode::Div => {
                if b == 0 {
                    return Err(SimError::DivideByZero { pc });
                }
                Some(a.wrapping_div(b))
            }
            Opcode::And => Some(a & b),
            Opcode::Or => Some(a | b),
            Opcode::Xor => Some(a ^ b),
            Opcode::Addl => Some(a.wrapping_add(inst.imm)),
            Opcode::Subl => Some(a.wrapping_sub(inst.imm)),
            Opcode::Cmp => {
                self.cc = (a.cmp(&b) as i8).into();
                None
            }
            Opcode::Movc => {
                self.regs[inst.rd] = inst.imm;
                None
            }
            Opcode::Load => {
                let idx = self.address(pc, a.wrapping_add(inst.imm))?;
                self.regs[inst.rd] = self.memory[idx];
                None
            }
            Opcode::Store => {
                let idx = self.address(pc, b.wrapping_add(inst.imm))?;
                self.memory[idx] = a;
                None
            }
            Opcode::Bz | Opcode::Bnz | Opcode::Bp | Opcode::Bnp => {
                let taken = match inst.opcode {
                    Opcode::Bz => self.cc == 0,
                    Opcode::Bnz => self.cc != 0,
                    Opcode::Bp => self.cc > 0,
                    _ => self.cc < 0,
                };
                if taken {
                    next = pc.wrapping_add(inst.imm);
                }
                None
            }
            Opcode::Jump => {
                next = a.wrapping_add(inst.imm);
                None
            }
            Opcode::Jalr => {
                next = a.wrapping_add(inst.imm);
                self.regs[inst.rd] = fall_through;
                None
            }
            Opcode::Ret => {
                next = a;
                None
            }
            Opcode::Halt => {
                self.trace.push(pc);
                return Ok(Some(HaltReason::HaltInstruction));
            }
        };

        if let Some(value) = flag_result {
            self.regs[inst.rd] = value;
            self.cc = value;
        }
        self.trace.push(pc);
        self.pc = next;
        Ok(None)
    }
}
