//! Multiply/divide unit.
//!
//! A four-stage pipeline. A packet accepted at stage 1 advances one stage per
//! cycle and leaves stage 4 with its result, so a new operation can start every
//! cycle. Division truncates toward zero; a zero divisor is a fault.

use crate::common::constants::{MUL_DIV_STAGES, Word};
use crate::common::error::SimError;
use crate::core::pipeline::latches::{ExecPacket, ResultPacket};
use crate::isa::Opcode;

/// Pipelined multiply/divide unit.
#[derive(Clone, Debug, Default)]
pub struct MulDivUnit {
    stages: [Option<ExecPacket>; MUL_DIV_STAGES],
}

impl MulDivUnit {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances every stage; returns the result leaving the last stage.
    pub fn tick(&mut self) -> Option<ResultPacket> {
        let done = self.stages[MUL_DIV_STAGES - 1].take().map(|pkt| Self::finish(&pkt));
        for stage in (1..MUL_DIV_STAGES).rev() {
            self.stages[stage] = self.stages[stage - 1].take();
        }
        done
    }

    /// True if stage 1 can take a packet this cycle.
    pub const fn can_accept(&self) -> bool {
        self.stages[0].is_none()
    }

    /// Starts an operation in stage 1.
    pub fn accept(&mut self, pkt: ExecPacket) {
        debug_assert!(self.stages[0].is_none(), "mul/div stage 1 overwritten");
        self.stages[0] = Some(pkt);
    }

    /// Drops every in-flight packet whose ROB slot is squashed.
    pub fn squash(&mut self, is_squashed: impl Fn(usize) -> bool) {
        for stage in &mut self.stages {
            if stage.is_some_and(|pkt| is_squashed(pkt.rob_index)) {
                *stage = None;
            }
        }
    }

    /// True when no stage holds a packet.
    pub fn is_idle(&self) -> bool {
        self.stages.iter().all(Option::is_none)
    }

    /// Packets in flight, stage 1 first.
    pub fn in_flight(&self) -> impl Iterator<Item = &ExecPacket> + '_ {
        self.stages.iter().flatten()
    }

    fn finish(pkt: &ExecPacket) -> ResultPacket {
        match Self::compute(pkt.opcode, pkt.src1, pkt.src2) {
            Some(value) => ResultPacket::from_exec(pkt, value),
            None => {
                let mut result = ResultPacket::from_exec(pkt, 0);
                result.fault = Some(SimError::DivideByZero { pc: pkt.pc });
                result
            }
        }
    }

    /// Product or quotient; `None` on division by zero.
    pub const fn compute(op: Opcode, a: Word, b: Word) -> Option<Word> {
        match op {
            Opcode::Mul => Some(a.wrapping_mul(b)),
            Opcode::Div if b == 0 => None,
            Opcode::Div => Some(a.wrapping_div(b)),
            _ => Some(0),
        }
    }
}
