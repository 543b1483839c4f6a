//! Pipeline latch interface.
//!
//! Every buffer that a misprediction must be able to empty implements
//! [`PipelineLatch`], so recovery can clear the front end uniformly.

/// Represents a pipeline latch (inter-stage buffer).
pub trait PipelineLatch {
    /// Discards the held instruction(s).
    ///
    /// Called when a branch misprediction or a RET redirect squashes younger work.
    fn flush(&mut self);

    /// Checks if the latch is empty.
    fn is_empty(&self) -> bool;
}
