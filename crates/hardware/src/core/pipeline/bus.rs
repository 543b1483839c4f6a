//! Forwarding buses.
//!
//! Each functional unit class drives its own bus. A result placed on a bus by
//! the execute stage is broadcast by the forward stage of the following cycle
//! and then moves on to writeback.

use crate::core::pipeline::latches::ResultPacket;

/// One result slot per functional unit class.
#[derive(Clone, Debug, Default)]
pub struct ForwardBuses {
    /// Integer unit result.
    pub int: Option<ResultPacket>,
    /// Multiply/divide unit result.
    pub muldiv: Option<ResultPacket>,
    /// Branch unit result.
    pub branch: Option<ResultPacket>,
    /// Memory unit result.
    pub memory: Option<ResultPacket>,
}

impl ForwardBuses {
    /// Empties the data buses in broadcast order: memory, integer, mul/div.
    ///
    /// The branch bus is handled separately since it can trigger a flush.
    pub fn drain_data(&mut self) -> impl Iterator<Item = ResultPacket> + use<> {
        [self.memory.take(), self.int.take(), self.muldiv.take()]
            .into_iter()
            .flatten()
    }

    /// Drops every result whose ROB slot is squashed.
    pub fn squash(&mut self, is_squashed: impl Fn(usize) -> bool) {
        for bus in [&mut self.int, &mut self.muldiv, &mut self.branch, &mut self.memory] {
            if bus.as_ref().is_some_and(|r| is_squashed(r.rob_index)) {
                *bus = None;
            }
        }
    }

    /// True when no bus carries a result.
    pub const fn is_empty(&self) -> bool {
        self.int.is_none() && self.muldiv.is_none() && self.branch.is_none() && self.memory.is_none()
    }
}
