//! Out-of-order CPU core simulator library.
//!
//! This crate models the execution core of a pipelined, out-of-order processor
//! at cycle granularity:
//! 1. **Core:** Register renaming with a physical register file, free list and
//!    MRI map; an issue queue with oldest-ready selection; a reorder buffer and
//!    load/store queue for in-order commit and memory ordering.
//! 2. **Units:** Single-cycle integer and branch units, a four-stage
//!    multiply/divide pipeline and a two-cycle memory unit, joined by
//!    per-unit forwarding buses.
//! 3. **Speculation:** BTB prediction at fetch, checkpoints at branch dispatch,
//!    and rollback of everything younger on a misprediction.
//! 4. **ISA:** A three-address integer instruction set with a condition code.
//! 5. **Simulation:** Configuration, a steppable driver, snapshots, invariant
//!    checks and statistics.

/// Common types and constants (word type, errors, ring buffer).
pub mod common;
/// Simulator configuration (defaults, sectioned config structures, validation).
pub mod config;
/// CPU core (architectural state, renaming, pipeline, functional units).
pub mod core;
/// Instruction set (opcodes, instructions, program image).
pub mod isa;
/// Simulation driver, program loading, snapshots and invariant checks.
pub mod sim;
/// Simulation statistics collection.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Owned CPU context shared by every pipeline stage.
pub use crate::core::Cpu;
/// Steppable simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
