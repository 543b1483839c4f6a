//! Front-end pipeline stages.
//!
//! The front end carries instructions in program order:
//! Fetch -> Decode -> Rename-Dispatch -> Dispatch.
//! Each latch holds one instruction; stages run youngest-last so a latch is
//! only refilled after its consumer has run this cycle.

pub mod decode;
pub mod dispatch;
pub mod fetch;
pub mod rename;

use crate::core::Cpu;
use crate::core::pipeline::latches::{DecodedInst, FetchedInst, Latch};
use crate::core::pipeline::traits::PipelineLatch;

/// The front-end latches.
#[derive(Clone, Debug, Default)]
pub struct Frontend {
    /// Fetch -> Decode latch.
    pub fetch_decode: Latch<FetchedInst>,
    /// Decode -> Rename-Dispatch latch.
    pub decode_rename: Latch<DecodedInst>,
    /// Rename-Dispatch -> Dispatch latch.
    pub rename_dispatch: Latch<DecodedInst>,
}

impl Frontend {
    /// Creates an empty front end.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes one cycle of all front-end stages (reverse order).
    pub fn tick(&mut self, cpu: &mut Cpu) {
        // Dispatch: rename_dispatch -> ROB / IQ / LSQ
        if let Some(target) = dispatch::dispatch_stage(cpu, &mut self.rename_dispatch) {
            // RET resolved to an unpredicted target; everything behind it is wrong-path.
            self.fetch_decode.flush();
            self.decode_rename.flush();
            cpu.redirect(target);
        }

        // Rename-Dispatch: decode_rename -> rename_dispatch
        rename::rename_stage(cpu, &mut self.decode_rename, &mut self.rename_dispatch);

        // Decode: fetch_decode -> decode_rename
        decode::decode_stage(&mut self.fetch_decode, &mut self.decode_rename);

        // Fetch: pc -> fetch_decode
        fetch::fetch_stage(cpu, &mut self.fetch_decode);
    }

    /// Flushes all front-end latches.
    pub fn flush(&mut self) {
        self.fetch_decode.flush();
        self.decode_rename.flush();
        self.rename_dispatch.flush();
    }

    /// True when no latch holds an instruction.
    pub fn is_empty(&self) -> bool {
        self.fetch_decode.is_empty() && self.decode_rename.is_empty() && self.rename_dispatch.is_empty()
    }
}
