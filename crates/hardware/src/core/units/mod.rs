//! Execution units.
//!
//! This module contains the functional units behind the issue queue and the
//! load/store queue:
//! 1. **Integer:** Single-cycle arithmetic, logic and address generation.
//! 2. **Multiply/Divide:** Four-stage pipelined unit.
//! 3. **Branch:** Single-cycle resolution plus the branch target buffer.
//! 4. **Memory:** Two-cycle data memory access.

/// Integer unit.
pub mod alu;

/// Branch unit and branch target buffer.
pub mod bru;

/// Memory unit and data memory.
pub mod lsu;

/// Pipelined multiply/divide unit.
pub mod muldiv;
