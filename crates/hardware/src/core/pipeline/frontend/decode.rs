//! Decode Stage: attach the static opcode properties.
//!
//! Instructions are validated when the program image is built, so decode
//! cannot fail; it looks up the opcode's entry in the info table and moves
//! the instruction on when the rename latch is free.

use crate::core::pipeline::latches::{DecodedInst, FetchedInst, Latch};
use crate::core::pipeline::traits::PipelineLatch;

/// Executes the decode stage.
pub fn decode_stage(input: &mut Latch<FetchedInst>, output: &mut Latch<DecodedInst>) {
    if input.is_empty() {
        return;
    }
    if !output.is_empty() {
        input.stalled = true;
        return;
    }
    if let Some(fetched) = input.take() {
        output.put(DecodedInst {
            pc: fetched.pc,
            inst: fetched.inst,
            info: fetched.inst.opcode.info(),
            pred_next_pc: fetched.pred_next_pc,
        });
    }
}
