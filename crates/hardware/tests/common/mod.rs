//! Shared test infrastructure.

/// Instruction constructors.
pub mod builder;

/// Simulation harness and sequential reference interpreter.
pub mod harness;

/// In-order interpreter used as the architectural oracle.
pub mod reference;

pub use harness::{TestContext, init_tracing};
pub use reference::Reference;
