//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Constants:** The word type, code image layout and unit latencies.
//! 2. **Error Handling:** Decode, execution and configuration errors.
//! 3. **Ring Buffer:** The bounded FIFO behind the free list, ROB and LSQ.

/// Core-wide constants and the machine word type.
pub mod constants;

/// Error types.
pub mod error;

/// Bounded ring buffer with stable slot indices.
pub mod ring;

pub use constants::Word;
pub use error::{ConfigError, SimError};
pub use ring::RingBuffer;
