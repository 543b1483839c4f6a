//! Observability snapshot.
//!
//! A serializable copy of the state a tracer or test wants to look at. The
//! core never formats anything itself; callers render or diff snapshots.

use serde::Serialize;

use crate::common::constants::Word;
use crate::core::Cpu;
use crate::core::arch::ArchReg;
use crate::core::pipeline::rob::RobState;
use crate::core::rename::{PhysEntry, PhysReg, RenameEntry};
use crate::isa::Opcode;

/// Used and total capacity of a queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    /// Occupied entries.
    pub len: usize,
    /// Total entries.
    pub capacity: usize,
}

/// One rename-table slot with its most recent instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RenameSlot {
    /// Current mapping and source.
    pub entry: RenameEntry,
    /// Most recently allocated instance.
    pub most_recent: Option<PhysReg>,
}

/// One in-flight ROB entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RobSlot {
    /// Slot index.
    pub index: usize,
    /// Program counter.
    pub pc: Word,
    /// Operation.
    pub opcode: Opcode,
    /// Destination physical register.
    pub phys: Option<PhysReg>,
    /// Result available.
    pub completed: bool,
}

/// Point-in-time view of the core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Cycles elapsed.
    pub cycle: u64,
    /// Instructions retired.
    pub retired: u64,
    /// Next fetch address.
    pub pc: Word,
    /// Fetch has stopped.
    pub fetch_halted: bool,
    /// Architectural registers, excluding the condition-code alias.
    pub arch_regs: Vec<ArchReg>,
    /// Condition-code register.
    pub cc: ArchReg,
    /// Physical register file.
    pub phys_regs: Vec<PhysEntry>,
    /// Free registers in allocation order.
    pub free_list: Vec<PhysReg>,
    /// Rename table, the condition-code alias last.
    pub rename: Vec<RenameSlot>,
    /// ROB contents, oldest first.
    pub rob_entries: Vec<RobSlot>,
    /// Issue queue occupancy.
    pub iq: Occupancy,
    /// Load/store queue occupancy.
    pub lsq: Occupancy,
    /// Reorder buffer occupancy.
    pub rob: Occupancy,
    /// A control-flow instruction is unresolved.
    pub branch_unresolved: bool,
}

impl Snapshot {
    /// Captures the current state of `cpu`.
    pub fn capture(cpu: &Cpu) -> Self {
        let rename = (0..cpu.rename.len())
            .map(|slot| RenameSlot {
                entry: cpu.rename.lookup(slot),
                most_recent: cpu.rename.most_recent(slot),
            })
            .collect();
        let rob_entries = cpu
            .rob
            .iter()
            .map(|(index, entry)| RobSlot {
                index,
                pc: entry.pc,
                opcode: entry.opcode,
                phys: entry.phys,
                completed: entry.state == RobState::Completed,
            })
            .collect();

        Self {
            cycle: cpu.stats.cycles,
            retired: cpu.stats.instructions_retired,
            pc: cpu.pc,
            fetch_halted: cpu.fetch_halted,
            arch_regs: cpu.arf.general().to_vec(),
            cc: cpu.arf.cc(),
            phys_regs: cpu.prf.entries().to_vec(),
            free_list: cpu.free_list.iter().collect(),
            rename,
            rob_entries,
            iq: Occupancy {
                len: cpu.iq.len(),
                capacity: cpu.iq.capacity(),
            },
            lsq: Occupancy {
                len: cpu.lsq.len(),
                capacity: cpu.lsq.capacity(),
            },
            rob: Occupancy {
                len: cpu.rob.len(),
                capacity: cpu.rob.capacity(),
            },
            branch_unresolved: cpu.branch_unresolved,
        }
    }
}
