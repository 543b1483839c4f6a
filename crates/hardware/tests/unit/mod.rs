//! Component and end-to-end suites.


/// Register renaming, recovery and memory ordering as seen through the pipeline.
pub mod core;

/// Program loading.
pub mod isa;

/// Whole-program scenarios, invariants and reference equivalence.
pub mod sim;

/// Performance counter accounting.
pub mod stats_verification;
