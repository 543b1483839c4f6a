//! Back-end pipeline stages.
//!
//! The back end covers: Issue -> Execute -> Forward -> Writeback -> Commit,
//! with the LSQ draining into the memory unit alongside. Stages are free
//! functions over the CPU context and the back-end latches, run in reverse
//! pipeline order so each result becomes visible to earlier stages one cycle
//! later.

pub mod commit;
pub mod execute;
pub mod forward;
pub mod issue;
pub mod memory;
pub mod recovery;
pub mod writeback;

use crate::common::constants::Word;
use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::cpu::HaltReason;
use crate::core::pipeline::bus::ForwardBuses;
use crate::core::pipeline::latches::{ExecPacket, Latch, ResultPacket};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::lsu::MemoryUnit;
use crate::core::units::muldiv::MulDivUnit;

/// What one back-end cycle asks of the rest of the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackendOutcome {
    /// `HALT` retired.
    pub halt: Option<HaltReason>,
    /// A misprediction squashed younger work; fetch restarts here.
    pub redirect: Option<Word>,
}

/// Functional units and the latches between back-end stages.
#[derive(Clone, Debug, Default)]
pub struct Backend {
    /// Integer unit input.
    pub int_input: Latch<ExecPacket>,
    /// Branch unit input.
    pub branch_input: Latch<ExecPacket>,
    /// Multiply/divide pipeline.
    pub muldiv: MulDivUnit,
    /// Memory unit.
    pub mem_unit: MemoryUnit,
    /// Results awaiting broadcast.
    pub buses: ForwardBuses,
    /// Broadcast results awaiting writeback.
    pub writeback: Vec<ResultPacket>,
}

impl Backend {
    /// Creates an idle back end.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one cycle of all back-end stages (reverse order).
    ///
    /// # Errors
    ///
    /// Returns the fault of an instruction that reached the ROB head faulted.
    pub fn tick(&mut self, cpu: &mut Cpu) -> Result<BackendOutcome, SimError> {
        if let Some(reason) = commit::commit_stage(cpu)? {
            return Ok(BackendOutcome {
                halt: Some(reason),
                redirect: None,
            });
        }

        writeback::writeback_stage(cpu, &mut self.writeback);
        let redirect = forward::forward_stage(cpu, self);
        execute::execute_stage(cpu, self);
        memory::drain_stage(cpu, &mut self.mem_unit);
        issue::issue_stage(cpu, self);

        Ok(BackendOutcome {
            halt: None,
            redirect,
        })
    }

    /// Drops every in-flight packet and result whose ROB slot is squashed.
    pub fn squash(&mut self, is_squashed: impl Fn(usize) -> bool) {
        for input in [&mut self.int_input, &mut self.branch_input] {
            if input.peek().is_some_and(|pkt| is_squashed(pkt.rob_index)) {
                input.flush();
            }
        }
        self.muldiv.squash(&is_squashed);
        self.mem_unit.squash(&is_squashed);
        self.buses.squash(&is_squashed);
        self.writeback.retain(|result| !is_squashed(result.rob_index));
    }

    /// True when no unit, bus or latch holds work.
    pub fn is_idle(&self) -> bool {
        self.int_input.is_empty()
            && self.branch_input.is_empty()
            && self.muldiv.is_idle()
            && !self.mem_unit.is_busy()
            && self.buses.is_empty()
            && self.writeback.is_empty()
    }
}
