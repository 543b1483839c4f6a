//! Simulator: owns both the CPU and the pipeline side-by-side.
//!
//! Keeping the pipeline outside `Cpu` lets every stage borrow the CPU context
//! mutably while the pipeline borrows its own latches.

use serde::Serialize;
use tracing::{info, warn};

use super::invariants::{self, InvariantViolation};
use super::loader;
use super::snapshot::Snapshot;
use crate::common::constants::Word;
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::arch::ArchReg;
use crate::core::cpu::{HaltReason, RetireRecord};
use crate::core::pipeline::Pipeline;
use crate::isa::{Instruction, Program, RawInstruction};
use crate::stats::SimStats;

/// Result of one [`Simulator::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StepOutcome {
    /// The simulation can continue.
    Running,
    /// The simulation has terminated.
    Halted(HaltReason),
}

/// Top-level simulator: CPU state + pipeline.
///
/// # Examples
///
/// ```
/// use oosim_core::{Config, Simulator};
/// use oosim_core::core::cpu::HaltReason;
///
/// let mut sim = Simulator::from_assembly("MOVC R1,#5\nADD R2,R1,R1\nHALT", &Config::default()).unwrap();
/// assert_eq!(sim.run_to_completion().unwrap(), HaltReason::HaltInstruction);
/// assert_eq!(sim.arch_reg(2), Some(10));
/// assert!(sim.cc().flags.positive);
/// ```
#[derive(Clone, Debug)]
pub struct Simulator {
    cpu: Cpu,
    pipeline: Pipeline,
    max_cycles: u64,
    halted: Option<HaltReason>,
}

impl Simulator {
    /// Creates a simulator for `instructions` loaded at the configured code base.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for an invalid configuration and
    /// [`SimError::RegisterOutOfRange`] for an instruction naming a register
    /// outside the architectural register file.
    pub fn new(instructions: &[Instruction], config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        let program = Program::new(
            config.general.code_base,
            instructions.to_vec(),
            config.core.arch_regs,
        )?;
        Ok(Self::with_program(program, config))
    }

    /// Creates a simulator from raw loader records.
    pub fn from_raw(raw: &[RawInstruction], config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        let program = Program::from_raw(config.general.code_base, raw, config.core.arch_regs)?;
        Ok(Self::with_program(program, config))
    }

    /// Creates a simulator from an assembly listing.
    pub fn from_assembly(text: &str, config: &Config) -> Result<Self, SimError> {
        Self::new(&loader::parse_program(text)?, config)
    }

    fn with_program(program: Program, config: &Config) -> Self {
        info!(
            instructions = program.len(),
            base = program.base(),
            phys_regs = config.core.phys_regs,
            rob = config.core.rob_size,
            "simulator initialized"
        );
        Self {
            cpu: Cpu::new(program, config),
            pipeline: Pipeline::new(),
            max_cycles: config.general.max_cycles,
            halted: None,
        }
    }

    /// Advances the simulation by one clock cycle.
    ///
    /// Stepping a halted simulator does nothing and reports the halt again.
    ///
    /// # Errors
    ///
    /// Returns the fault of an instruction that reached the ROB head faulted.
    /// The faulting instruction stays at the head, so stepping again reports
    /// the same fault.
    pub fn step(&mut self) -> Result<StepOutcome, SimError> {
        if let Some(reason) = self.halted {
            return Ok(StepOutcome::Halted(reason));
        }
        match self.pipeline.tick(&mut self.cpu)? {
            Some(reason) => {
                info!(
                    ?reason,
                    cycles = self.cpu.stats.cycles,
                    retired = self.cpu.stats.instructions_retired,
                    "simulation halted"
                );
                self.halted = Some(reason);
                Ok(StepOutcome::Halted(reason))
            }
            None => Ok(StepOutcome::Running),
        }
    }

    /// Steps until the simulation halts.
    ///
    /// # Errors
    ///
    /// Returns a fault from [`Self::step`], or [`SimError::CycleLimit`] when
    /// the configured cycle budget runs out first.
    pub fn run_to_completion(&mut self) -> Result<HaltReason, SimError> {
        loop {
            if let StepOutcome::Halted(reason) = self.step()? {
                return Ok(reason);
            }
            if self.cpu.stats.cycles >= self.max_cycles {
                warn!(cycles = self.cpu.stats.cycles, pc = self.cpu.pc, "cycle limit reached");
                return Err(SimError::CycleLimit(self.max_cycles));
            }
        }
    }

    /// Writes a data memory word before or between steps.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AddressOutOfBounds`] for an address outside data memory.
    pub fn write_memory(&mut self, address: Word, value: Word) -> Result<(), SimError> {
        let idx = self.cpu.memory.check(self.cpu.pc, address)?;
        self.cpu.memory.write(idx, value);
        Ok(())
    }

    /// Why the simulation stopped, once it has.
    pub const fn halt_reason(&self) -> Option<HaltReason> {
        self.halted
    }

    /// True once the simulation has terminated.
    pub const fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Cycles elapsed.
    pub const fn cycles(&self) -> u64 {
        self.cpu.stats.cycles
    }

    /// Instructions retired.
    pub const fn instructions_retired(&self) -> u64 {
        self.cpu.stats.instructions_retired
    }

    /// Performance counters.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Committed value of architectural register `idx`.
    ///
    /// Returns `None` for an index outside the architectural register file.
    /// The condition code is not addressable here; use [`Self::cc`].
    pub fn arch_reg(&self, idx: usize) -> Option<Word> {
        self.cpu.arf.general().get(idx).map(|reg| reg.value)
    }

    /// Committed architectural registers, excluding the condition code.
    pub fn arch_regs(&self) -> &[ArchReg] {
        self.cpu.arf.general()
    }

    /// Committed condition-code register.
    pub fn cc(&self) -> ArchReg {
        self.cpu.arf.cc()
    }

    /// Data memory contents.
    pub fn memory(&self) -> &[Word] {
        self.cpu.memory.words()
    }

    /// Most recent retirements, oldest first.
    pub fn retire_trace(&self) -> impl Iterator<Item = &RetireRecord> + '_ {
        self.cpu.retire_trace.iter()
    }

    /// The CPU context.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// The pipeline latches and units.
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Captures an observability snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.cpu)
    }

    /// Checks the structural invariants of the core.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        invariants::check(&self.cpu)
    }
}
