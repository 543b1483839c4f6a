//! Architectural state.
//!
//! This module contains the committed, program-visible state:
//! 1. **ARF:** The architectural register file and its condition-code alias.
//! 2. **Flags:** Zero and positive flags derived from result values.

/// Architectural register file.
pub mod arf;

/// Condition flags.
pub mod flags;

pub use arf::{ArchReg, ArchRegFile};
pub use flags::Flags;
