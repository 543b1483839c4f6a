//! Condition flags.

use serde::Serialize;

use crate::common::constants::Word;

/// Zero and positive flags derived from a result value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Flags {
    /// Result was zero.
    pub zero: bool,
    /// Result was strictly greater than zero.
    pub positive: bool,
}

impl Flags {
    /// Flags for `value`.
    #[inline]
    pub const fn from_result(value: Word) -> Self {
        Self {
            zero: value == 0,
            positive: value > 0,
        }
    }
}
