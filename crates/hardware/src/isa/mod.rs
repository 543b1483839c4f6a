//! Instruction Set Architecture definitions.
//!
//! A small three-address integer ISA with a condition-code register. It provides:
//! 1. **Opcodes:** The opcode enum and its static property table.
//! 2. **Instructions:** Raw records and validated instructions.
//! 3. **Programs:** The read-only code image indexed by address.

/// Validated instructions and raw loader records.
pub mod instruction;

/// Opcodes and the per-opcode property table.
pub mod opcode;

/// Program image.
pub mod program;

pub use instruction::{Instruction, RawInstruction};
pub use opcode::{FuClass, InsnClass, MemKind, OpInfo, Opcode, Source};
pub use program::Program;
