//! Out-of-order instruction pipeline.
//!
//! This module contains the pipeline structures and the stages that move
//! instructions through them:
//! 1. **Latches:** Inter-stage buffers, operands and result packets.
//! 2. **Queues:** The reorder buffer, load/store queue and issue queue.
//! 3. **Buses:** Per-unit forwarding buses.
//! 4. **Stages:** The front end (fetch to dispatch) and back end (issue to commit).
//! 5. **Engine:** The per-cycle driver that runs both halves in reverse order.

/// Back-end stages (issue, execute, forward, writeback, LSQ drain, commit, recovery).
pub mod backend;

/// Forwarding buses.
pub mod bus;

/// Whole-pipeline cycle driver.
pub mod engine;

/// Front-end stages (fetch, decode, rename-dispatch, dispatch).
pub mod frontend;

/// Issue queue.
pub mod issue_queue;

/// Inter-stage latches and packets.
pub mod latches;

/// Load/store queue.
pub mod lsq;

/// Reorder buffer.
pub mod rob;

/// Latch interface.
pub mod traits;

pub use engine::Pipeline;
