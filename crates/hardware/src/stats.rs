//! Simulation statistics collection.
//!
//! This module tracks performance metrics for the core. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (CPI, IPC).
//! 2. **Instruction mix:** Retirements by class (integer, mul/div, branch, load, store).
//! 3. **Branch prediction:** Correct predictions, mispredictions and recovery cost.
//! 4. **Stalls:** Dispatch stall cycles broken down by the resource that was missing.

use serde::Serialize;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Integer-class instructions retired (including `MOVC` and `HALT`).
    pub inst_int: u64,
    /// Multiply/divide instructions retired.
    pub inst_muldiv: u64,
    /// Branch-class instructions retired (branches, jumps, `CMP`, `RET`).
    pub inst_branch: u64,
    /// Loads retired.
    pub inst_load: u64,
    /// Stores retired.
    pub inst_store: u64,

    /// Control-flow instructions whose fetch-time prediction was correct.
    pub branch_predictions: u64,
    /// Control-flow instructions that redirected fetch on resolution.
    pub branch_mispredictions: u64,
    /// Back-end flushes performed.
    pub flushes: u64,
    /// ROB entries discarded by flushes.
    pub squashed: u64,

    /// Dispatch stall cycles: ROB full.
    pub stalls_rob: u64,
    /// Dispatch stall cycles: issue queue full.
    pub stalls_iq: u64,
    /// Dispatch stall cycles: load/store queue full.
    pub stalls_lsq: u64,
    /// Dispatch stall cycles: free list empty.
    pub stalls_phys_reg: u64,
    /// Rename-dispatch stall cycles: another branch unresolved.
    pub stalls_branch: u64,
    /// Dispatch stall cycles: `RET` waiting for its target register.
    pub stalls_ret_operand: u64,
}

impl SimStats {
    /// Cycles per retired instruction; zero before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Retired instructions per cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Fraction of resolved control flow that was predicted correctly.
    pub fn branch_accuracy(&self) -> f64 {
        let total = self.branch_predictions + self.branch_mispredictions;
        if total == 0 {
            1.0
        } else {
            self.branch_predictions as f64 / total as f64
        }
    }

    /// Total dispatch stall cycles over all causes.
    pub const fn total_stalls(&self) -> u64 {
        self.stalls_rob
            + self.stalls_iq
            + self.stalls_lsq
            + self.stalls_phys_reg
            + self.stalls_branch
            + self.stalls_ret_operand
    }
}
