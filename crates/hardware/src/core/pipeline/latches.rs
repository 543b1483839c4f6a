//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines what travels between stages:
//! Fetch → Decode → Rename-Dispatch → Dispatch → IQ → FU → Forward → Writeback → Commit.
//!
//! 1. **Front End:** Single-entry latches carrying fetched and decoded instructions
//!    along with the fetch-time prediction.
//! 2. **Operands:** Source values captured at dispatch, or the tag still awaited.
//! 3. **Back End:** Packets entering a functional unit and results leaving one.

use crate::common::constants::Word;
use crate::common::error::SimError;
use crate::core::arch::Flags;
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::rename::PhysReg;
use crate::isa::{Instruction, OpInfo, Opcode};

/// Single-entry latch between two front-end stages.
#[derive(Clone, Debug)]
pub struct Latch<T> {
    /// Held instruction, if any.
    pub entry: Option<T>,
    /// The downstream stage refused the entry this cycle.
    pub stalled: bool,
}

impl<T> Default for Latch<T> {
    fn default() -> Self {
        Self {
            entry: None,
            stalled: false,
        }
    }
}

impl<T> Latch<T> {
    /// Takes the held entry, leaving the latch empty.
    pub fn take(&mut self) -> Option<T> {
        self.stalled = false;
        self.entry.take()
    }

    /// Places an entry into an empty latch.
    pub fn put(&mut self, entry: T) {
        debug_assert!(self.entry.is_none(), "latch overwritten");
        self.entry = Some(entry);
    }

    /// Held entry.
    pub fn peek(&self) -> Option<&T> {
        self.entry.as_ref()
    }
}

impl<T> PipelineLatch for Latch<T> {
    fn flush(&mut self) {
        self.entry = None;
        self.stalled = false;
    }

    fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

/// Entry in the Fetch → Decode latch.
#[derive(Clone, Copy, Debug)]
pub struct FetchedInst {
    /// Program counter of the instruction.
    pub pc: Word,
    /// The instruction.
    pub inst: Instruction,
    /// Next fetch address chosen by the predictor.
    pub pred_next_pc: Word,
}

/// Entry in the Decode → Rename-Dispatch and Rename-Dispatch → Dispatch latches.
#[derive(Clone, Copy, Debug)]
pub struct DecodedInst {
    /// Program counter of the instruction.
    pub pc: Word,
    /// The instruction.
    pub inst: Instruction,
    /// Static properties of the opcode.
    pub info: &'static OpInfo,
    /// Next fetch address chosen by the predictor.
    pub pred_next_pc: Word,
}

/// Source operand captured at dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operand {
    /// Producer still awaited, or the register the value was read from.
    pub tag: Option<PhysReg>,
    /// Operand value, meaningful once `ready`.
    pub value: Word,
    /// Value is available.
    pub ready: bool,
}

impl Operand {
    /// An operand whose value is already known.
    pub const fn ready(value: Word) -> Self {
        Self {
            tag: None,
            value,
            ready: true,
        }
    }

    /// An operand waiting on `tag`.
    pub const fn pending(tag: PhysReg) -> Self {
        Self {
            tag: Some(tag),
            value: 0,
            ready: false,
        }
    }

    /// Captures a broadcast result if this operand waits on `tag`.
    ///
    /// Returns true if the operand became ready.
    pub fn wake(&mut self, tag: PhysReg, value: Word) -> bool {
        if !self.ready && self.tag == Some(tag) {
            self.value = value;
            self.ready = true;
            true
        } else {
            false
        }
    }
}

/// Instruction issued to a functional unit.
#[derive(Clone, Copy, Debug)]
pub struct ExecPacket {
    /// Program counter of the instruction.
    pub pc: Word,
    /// Operation.
    pub opcode: Opcode,
    /// ROB slot of the instruction.
    pub rob_index: usize,
    /// LSQ slot for memory instructions.
    pub lsq_index: Option<usize>,
    /// Destination physical register.
    pub dest: Option<PhysReg>,
    /// First source value.
    pub src1: Word,
    /// Second source value.
    pub src2: Word,
    /// Immediate / literal.
    pub imm: Word,
    /// Next fetch address chosen by the predictor.
    pub pred_next_pc: Word,
}

/// Resolved outcome of a control-flow instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchOutcome {
    /// Control left the fall-through path.
    pub taken: bool,
    /// Target when taken.
    pub target: Word,
    /// Address of the next instruction on the correct path.
    pub next_pc: Word,
    /// `next_pc` differs from the fetch-time prediction.
    pub mispredicted: bool,
}

/// Functional unit output carried by a forwarding bus and then writeback.
#[derive(Clone, Debug)]
pub struct ResultPacket {
    /// Program counter of the instruction.
    pub pc: Word,
    /// Operation.
    pub opcode: Opcode,
    /// ROB slot of the instruction.
    pub rob_index: usize,
    /// LSQ slot for memory instructions.
    pub lsq_index: Option<usize>,
    /// Destination physical register.
    pub dest: Option<PhysReg>,
    /// Result value; the effective address for memory address generation.
    pub value: Word,
    /// Flags of `value`.
    pub flags: Flags,
    /// Set by the branch unit for control-flow instructions.
    pub branch: Option<BranchOutcome>,
    /// Execution fault, reported when the instruction reaches the ROB head.
    pub fault: Option<SimError>,
}

impl ResultPacket {
    /// A plain result for `pkt`.
    pub const fn from_exec(pkt: &ExecPacket, value: Word) -> Self {
        Self {
            pc: pkt.pc,
            opcode: pkt.opcode,
            rob_index: pkt.rob_index,
            lsq_index: pkt.lsq_index,
            dest: pkt.dest,
            value,
            flags: Flags::from_result(value),
            branch: None,
            fault: None,
        }
    }
}
