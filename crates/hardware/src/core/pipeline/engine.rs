//! Whole-pipeline cycle driver.
//!
//! One call to [`Pipeline::tick`] is one clock cycle. The back end runs first
//! (commit, writeback, forward, execute, LSQ drain, issue), then the front end
//! (dispatch, rename-dispatch, decode, fetch). A misprediction found by the
//! back end empties the front end before it runs, so fetch restarts on the
//! correct path in the same cycle.

use tracing::debug;

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::cpu::HaltReason;
use crate::core::pipeline::backend::Backend;
use crate::core::pipeline::frontend::Frontend;

/// The full pipeline: front-end latches plus back-end units.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    /// Fetch through dispatch.
    pub frontend: Frontend,
    /// Issue through commit.
    pub backend: Backend,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one cycle of the entire pipeline.
    ///
    /// Returns `Ok(Some(_))` on the cycle the simulation terminates.
    ///
    /// # Errors
    ///
    /// Returns the fault of an instruction that reached the ROB head faulted.
    pub fn tick(&mut self, cpu: &mut Cpu) -> Result<Option<HaltReason>, SimError> {
        cpu.stats.cycles += 1;

        // Backend always runs first so commit and writeback see last cycle's state.
        let outcome = self.backend.tick(cpu)?;
        if outcome.halt.is_some() {
            return Ok(outcome.halt);
        }

        if let Some(target) = outcome.redirect {
            self.frontend.flush();
            cpu.redirect(target);
        }

        self.frontend.tick(cpu);

        if self.is_drained(cpu) {
            debug!(cycle = cpu.stats.cycles, pc = cpu.pc, "instruction stream exhausted");
            return Ok(Some(HaltReason::StreamExhausted));
        }
        Ok(None)
    }

    /// Fetch has stopped and no instruction remains anywhere in flight.
    fn is_drained(&self, cpu: &Cpu) -> bool {
        cpu.fetch_halted && self.frontend.is_empty() && cpu.rob.is_empty() && self.backend.is_idle()
    }
}
