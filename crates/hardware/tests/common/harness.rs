//! Test harness around the simulator.

use oosim_core::common::{SimError, Word};
use oosim_core::core::cpu::HaltReason;
use oosim_core::isa::Instruction;
use oosim_core::sim::loader;
use oosim_core::sim::StepOutcome;
use oosim_core::{Config, Simulator};
use pretty_assertions::assert_eq;
use tracing_subscriber::EnvFilter;

use super::reference::Reference;

/// Installs a test-friendly subscriber; `RUST_LOG=oosim_core=debug` shows stage events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Cycle budget for harness runs.
const MAX_CYCLES: u64 = 20_000;

/// Owns a simulator and the program it was built from.
pub struct TestContext {
    pub sim: Simulator,
    pub program: Vec<Instruction>,
    pub config: Config,
}

impl TestContext {
    pub fn new(program: &[Instruction]) -> Self {
        Self::with_config(program, Config::default())
    }

    pub fn with_config(program: &[Instruction], mut config: Config) -> Self {
        init_tracing();
        config.general.max_cycles = config.general.max_cycles.min(MAX_CYCLES);
        let sim = Simulator::new(program, &config).expect("valid program and config");
        Self {
            sim,
            program: program.to_vec(),
            config,
        }
    }

    /// Builds a context from an assembly listing.
    pub fn asm(text: &str) -> Self {
        Self::new(&loader::parse_program(text).expect("valid assembly"))
    }

    pub fn run(&mut self) -> Result<HaltReason, SimError> {
        self.sim.run_to_completion()
    }

    /// Runs to completion, checking structural invariants after every cycle.
    pub fn run_checked(&mut self) -> Result<HaltReason, SimError> {
        loop {
            let outcome = self.sim.step()?;
            if let Err(violation) = self.sim.check_invariants() {
                panic!("cycle {}: {violation}\n{:#?}", self.sim.cycles(), self.sim.snapshot());
            }
            if let StepOutcome::Halted(reason) = outcome {
                return Ok(reason);
            }
            if self.sim.cycles() >= self.config.general.max_cycles {
                return Err(SimError::CycleLimit(self.config.general.max_cycles));
            }
        }
    }

    pub fn step_n(&mut self, n: usize) {
        for _ in 0..n {
            let _ = self.sim.step().expect("no fault");
        }
    }

    pub fn reg(&self, idx: usize) -> Word {
        self.sim.arch_reg(idx).expect("architectural register")
    }

    /// Runs the sequential reference over the same program.
    pub fn reference(&self) -> (Reference, Option<Result<HaltReason, SimError>>) {
        let mut reference = Reference::new(
            &self.program,
            self.config.core.arch_regs,
            self.config.memory.data_words,
        );
        let outcome = reference.run(10_000);
        (reference, outcome)
    }

    /// Runs both machines and asserts identical architectural outcomes.
    ///
    /// The retirement trace is compared only when it has not wrapped.
    pub fn assert_matches_reference(&mut self) {
        let (reference, expected) = self.reference();
        let expected = expected.expect("reference terminates");
        let actual = self.run_checked();
        assert_eq!(actual, expected, "termination");

        let regs: Vec<Word> = self.sim.arch_regs().iter().map(|r| r.value).collect();
        assert_eq!(regs, reference.regs, "registers");
        assert_eq!(self.sim.cc().value, reference.cc, "condition code");
        assert_eq!(self.sim.memory(), reference.memory.as_slice(), "memory");

        let retired: Vec<Word> = self.sim.retire_trace().map(|r| r.pc).collect();
        if reference.trace.len() == retired.len() {
            assert_eq!(retired, reference.trace, "retirement order");
        } else {
            assert!(retired.len() < reference.trace.len());
            let tail = &reference.trace[reference.trace.len() - retired.len()..];
            assert_eq!(retired, tail, "retirement order");
        }
    }
}
