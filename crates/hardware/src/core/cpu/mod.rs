//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the owned simulation context
//! that every pipeline stage reads and writes. It holds:
//! 1. **Architectural State:** The code image, fetch address and the ARF.
//! 2. **Rename State:** PRF, free list, rename table, MRI map and checkpoints.
//! 3. **Back-End Structures:** Issue queue, load/store queue, reorder buffer
//!    and data memory.
//! 4. **Observability:** Statistics and the retirement trace.

use std::collections::VecDeque;

use serde::Serialize;

use crate::common::constants::{INSTRUCTION_WIDTH, RETIRE_TRACE_MAX, Word};
use crate::config::Config;
use crate::core::arch::ArchRegFile;
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::pipeline::latches::Operand;
use crate::core::pipeline::lsq::Lsq;
use crate::core::pipeline::rob::Rob;
use crate::core::rename::{CheckpointStack, FreeList, PhysRegFile, RenameTable};
use crate::core::units::bru::Btb;
use crate::core::units::lsu::DataMemory;
use crate::isa::{Opcode, Program};
use crate::stats::SimStats;

/// Checkpoints live at once; one per unresolved branch.
const CHECKPOINT_LIMIT: usize = 1;

/// Why a simulation stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HaltReason {
    /// A `HALT` instruction reached the ROB head.
    HaltInstruction,
    /// Fetch left the code image and every in-flight instruction retired.
    StreamExhausted,
}

/// One retired instruction, as recorded in the retirement trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RetireRecord {
    /// Cycle of retirement.
    pub cycle: u64,
    /// ROB slot the instruction occupied.
    pub rob_index: usize,
    /// Program counter.
    pub pc: Word,
    /// Operation.
    pub opcode: Opcode,
}

/// Main CPU structure containing all processor state.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// Read-only code image.
    pub program: Program,
    /// Next fetch address.
    pub pc: Word,
    /// Fetch stopped after a `HALT` or after leaving the code image.
    pub fetch_halted: bool,

    /// Architectural register file.
    pub arf: ArchRegFile,
    /// Physical register file.
    pub prf: PhysRegFile,
    /// Free physical registers.
    pub free_list: FreeList,
    /// Rename table and MRI map.
    pub rename: RenameTable,
    /// Checkpoint of the unresolved branch.
    pub checkpoints: CheckpointStack,
    /// A control-flow instruction has passed rename-dispatch and not yet resolved.
    pub branch_unresolved: bool,
    /// Branch target buffer.
    pub btb: Btb,

    /// Issue queue.
    pub iq: IssueQueue,
    /// Load/store queue.
    pub lsq: Lsq,
    /// Reorder buffer.
    pub rob: Rob,
    /// Data memory.
    pub memory: DataMemory,

    /// Performance counters.
    pub stats: SimStats,
    /// Most recent retirements, oldest first.
    pub retire_trace: VecDeque<RetireRecord>,
}

impl Cpu {
    /// Creates a CPU sized by `config` with `program` loaded and fetch at its base.
    pub fn new(program: Program, config: &Config) -> Self {
        let core = &config.core;
        let pc = program.base();
        Self {
            program,
            pc,
            fetch_halted: false,
            arf: ArchRegFile::new(core.arch_regs),
            prf: PhysRegFile::new(core.phys_regs),
            free_list: FreeList::new(core.phys_regs),
            rename: RenameTable::new(core.arch_regs),
            checkpoints: CheckpointStack::new(CHECKPOINT_LIMIT),
            branch_unresolved: false,
            btb: Btb::new(core.btb_size),
            iq: IssueQueue::new(core.issue_queue_size),
            lsq: Lsq::new(core.lsq_size),
            rob: Rob::new(core.rob_size),
            memory: DataMemory::new(config.memory.data_words),
            stats: SimStats::default(),
            retire_trace: VecDeque::with_capacity(RETIRE_TRACE_MAX),
        }
    }

    /// Reads rename slot `slot` as a source operand.
    ///
    /// The value comes from the ARF when the slot is ARF-sourced, from the PRF
    /// when its producer has written back, and otherwise the producer's tag is
    /// returned for the operand to wait on.
    pub fn read_operand(&self, slot: usize) -> Operand {
        match self.rename.lookup(slot).producer() {
            Some(phys) if self.prf.is_valid(phys) => Operand {
                tag: Some(phys),
                value: self.prf.entry(phys).value,
                ready: true,
            },
            Some(phys) => Operand::pending(phys),
            None => Operand::ready(self.arf.read(slot)),
        }
    }

    /// Delivers a result to every IQ and LSQ operand waiting on `tag`.
    pub fn broadcast(&mut self, tag: crate::core::rename::PhysReg, value: Word) {
        self.iq.wake(tag, value);
        self.lsq.wake(tag, value);
    }

    /// Restarts fetch at `target`.
    pub fn redirect(&mut self, target: Word) {
        self.pc = target;
        self.fetch_halted = false;
    }

    /// Address following `pc` on the fall-through path.
    pub const fn next_sequential(pc: Word) -> Word {
        pc.wrapping_add(INSTRUCTION_WIDTH)
    }

    /// Appends to the retirement trace, dropping the oldest record when full.
    pub fn record_retirement(&mut self, record: RetireRecord) {
        if self.retire_trace.len() == RETIRE_TRACE_MAX {
            let _ = self.retire_trace.pop_front();
        }
        self.retire_trace.push_back(record);
    }
}
