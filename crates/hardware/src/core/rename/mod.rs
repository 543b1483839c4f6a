//! Register renaming state.
//!
//! This module contains everything that maps architectural registers onto
//! physical storage while instructions are in flight:
//! 1. **PRF:** Physical registers with per-register valid bits.
//! 2. **Free List:** Unallocated physical registers.
//! 3. **Rename Table:** Per-slot mapping with source flag, plus the MRI map.
//! 4. **Checkpoints:** Copies of the rename table and BTB taken at branches.
//!
//! Every physical register is at all times either on the free list or owned by
//! exactly one ROB entry.

/// Speculation checkpoints.
pub mod checkpoint;

/// Free list of physical registers.
pub mod free_list;

/// Physical register file.
pub mod prf;

/// Rename table and MRI map.
pub mod rename_table;

pub use checkpoint::{Checkpoint, CheckpointStack};
pub use free_list::FreeList;
pub use prf::{PhysEntry, PhysReg, PhysRegFile};
pub use rename_table::{RegSource, RenameEntry, RenameTable};
