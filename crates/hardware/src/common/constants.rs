//! Core-wide constants.
//!
//! This module holds the fixed numbers the pipeline is built around. It provides:
//! 1. **Code Image:** Base address and width of instructions in code memory.
//! 2. **Latencies:** Cycle counts of the multi-cycle functional units.
//! 3. **Observability:** Bounds on the retirement trace kept for inspection.

/// The machine word: every register and data memory cell holds one.
pub type Word = i32;

/// Address of the first instruction in code memory.
pub const CODE_BASE: Word = 4000;

/// Distance in bytes between consecutive instruction addresses.
pub const INSTRUCTION_WIDTH: Word = 4;

/// Number of pipelined stages in the multiply/divide unit.
pub const MUL_DIV_STAGES: usize = 4;

/// Cycles the memory unit holds an access before producing its result.
pub const MEMORY_LATENCY: u8 = 2;

/// Number of most recent retirements kept in the retirement trace.
pub const RETIRE_TRACE_MAX: usize = 256;

/// Default number of cycles without a halt before a run is declared hung.
pub const HANG_DETECTION_THRESHOLD: u64 = 1_000_000;
