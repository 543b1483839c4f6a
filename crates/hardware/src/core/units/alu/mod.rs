//! Integer unit.
//!
//! Single-cycle unit for register-to-register and immediate arithmetic, bitwise
//! logic, `MOVC`, and address generation for loads and stores. All arithmetic
//! wraps on overflow.

use crate::common::constants::Word;
use crate::core::pipeline::latches::{ExecPacket, ResultPacket};
use crate::isa::Opcode;

/// Arithmetic Logic Unit for integer operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Computes the integer result of `op`.
    ///
    /// For `LOAD` and `STORE` the result is the effective address `src1 + imm`,
    /// where `src1` is the base register. Returns `0` for opcodes that never
    /// issue to the integer unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use oosim_core::core::units::alu::Alu;
    /// use oosim_core::isa::Opcode;
    ///
    /// assert_eq!(Alu::compute(Opcode::Add, 40, 2, 0), 42);
    /// assert_eq!(Alu::compute(Opcode::Subl, 10, 0, 3), 7);
    /// assert_eq!(Alu::compute(Opcode::Add, i32::MAX, 1, 0), i32::MIN);
    /// ```
    pub const fn compute(op: Opcode, src1: Word, src2: Word, imm: Word) -> Word {
        match op {
            Opcode::Add => src1.wrapping_add(src2),
            Opcode::Sub => src1.wrapping_sub(src2),
            Opcode::And => src1 & src2,
            Opcode::Or => src1 | src2,
            Opcode::Xor => src1 ^ src2,
            Opcode::Movc => imm,
            Opcode::Addl | Opcode::Load | Opcode::Store => src1.wrapping_add(imm),
            Opcode::Subl => src1.wrapping_sub(imm),
            _ => 0,
        }
    }

    /// Executes an issued packet.
    pub const fn execute(pkt: &ExecPacket) -> ResultPacket {
        ResultPacket::from_exec(pkt, Self::compute(pkt.opcode, pkt.src1, pkt.src2, pkt.imm))
    }
}
