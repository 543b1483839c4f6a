//! Branch unit (BRU).
//!
//! Single-cycle unit that resolves control flow and executes `CMP`. It provides:
//! 1. **Resolution:** Direction and target of conditional branches, `JUMP` and `JALR`.
//! 2. **Misprediction Detection:** Comparison of the resolved next address with
//!    the address fetch chose.
//! 3. **Prediction Storage:** The branch target buffer consulted by fetch.

/// Branch Target Buffer for storing predicted branch targets.
pub mod btb;

pub use self::btb::Btb;

use std::cmp::Ordering;

use crate::common::constants::{INSTRUCTION_WIDTH, Word};
use crate::core::arch::Flags;
use crate::core::pipeline::latches::{BranchOutcome, ExecPacket, ResultPacket};
use crate::isa::Opcode;

/// Branch resolution unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct BranchUnit;

impl BranchUnit {
    /// Whether a conditional branch on condition code `cc` is taken.
    ///
    /// `BNP` is taken only on a strictly negative code; a zero code falls through.
    pub const fn condition_holds(op: Opcode, cc: Word) -> bool {
        let flags = Flags::from_result(cc);
        match op {
            Opcode::Bz => flags.zero,
            Opcode::Bnz => !flags.zero,
            Opcode::Bp => flags.positive,
            Opcode::Bnp => cc < 0,
            _ => false,
        }
    }

    /// Resolves an issued packet.
    ///
    /// Conditional branches read the condition code from `src1`; `JUMP`,
    /// `JALR` and `CMP` read registers from `src1`/`src2`.
    pub fn execute(pkt: &ExecPacket) -> ResultPacket {
        let fall_through = pkt.pc.wrapping_add(INSTRUCTION_WIDTH);
        let resolve = |taken: bool, target: Word| {
            let next_pc = if taken { target } else { fall_through };
            BranchOutcome {
                taken,
                target,
                next_pc,
                mispredicted: next_pc != pkt.pred_next_pc,
            }
        };

        match pkt.opcode {
            Opcode::Cmp => {
                let sign = match pkt.src1.cmp(&pkt.src2) {
                    Ordering::Less => -1,
                    Ordering::Equal => 0,
                    Ordering::Greater => 1,
                };
                ResultPacket::from_exec(pkt, sign)
            }
            Opcode::Jump => {
                let mut result = ResultPacket::from_exec(pkt, 0);
                result.branch = Some(resolve(true, pkt.src1.wrapping_add(pkt.imm)));
                result
            }
            Opcode::Jalr => {
                let mut result = ResultPacket::from_exec(pkt, fall_through);
                result.branch = Some(resolve(true, pkt.src1.wrapping_add(pkt.imm)));
                result
            }
            op => {
                let taken = Self::condition_holds(op, pkt.src1);
                let mut result = ResultPacket::from_exec(pkt, 0);
                result.branch = Some(resolve(taken, pkt.pc.wrapping_add(pkt.imm)));
                result
            }
        }
    }
}
