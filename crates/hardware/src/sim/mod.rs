//! Simulation driver and inspection.
//!
//! Provides the steppable `Simulator`, program loading, the observability
//! snapshot and the structural invariant checks.

pub mod invariants;
pub mod loader;
pub mod simulator;
pub mod snapshot;

pub use invariants::InvariantViolation;
pub use simulator::{Simulator, StepOutcome};
pub use snapshot::Snapshot;
