//! Core processor implementation.
//!
//! This module contains the out-of-order core: architectural and rename
//! state, the instruction pipeline, the functional units, and the CPU context
//! that ties them together.

/// Architectural state (register file, condition flags).
pub mod arch;

/// CPU context and termination reasons.
pub mod cpu;

/// Instruction pipeline (latches, queues, stages).
pub mod pipeline;

/// Register renaming (PRF, free list, rename table, checkpoints).
pub mod rename;

/// Functional units (integer, mul/div, branch, memory).
pub mod units;

pub use self::cpu::Cpu;
