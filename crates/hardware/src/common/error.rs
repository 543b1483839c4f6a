//! Error types for program loading, configuration and execution.
//!
//! This module defines the failures the simulator reports. It provides:
//! 1. **Decode Errors:** Unknown opcodes and out-of-range register identifiers,
//!    rejected before simulation starts.
//! 2. **Execution Faults:** Out-of-bounds data accesses and division by zero,
//!    recorded on the ROB entry and raised when that entry reaches the head.
//! 3. **Configuration Errors:** Invalid capacities or unparsable JSON.

use thiserror::Error;

use super::constants::Word;

/// Errors raised while loading or running a program.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// Numeric opcode not present in the instruction set.
    #[error("unknown opcode {0:#04x}")]
    UnknownOpcode(u8),

    /// Mnemonic not present in the instruction set.
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),

    /// Assembly text that does not match the operand shape of its mnemonic.
    #[error("line {line}: {message}")]
    Syntax {
        /// One-based source line.
        line: usize,
        /// What was expected.
        message: String,
    },

    /// Instruction names a register outside the architectural register file.
    #[error("instruction {index}: register {reg} out of range (architectural registers: {limit})")]
    RegisterOutOfRange {
        /// Position of the instruction in the program.
        index: usize,
        /// The offending register identifier.
        reg: i64,
        /// Number of architectural registers.
        limit: usize,
    },

    /// Load or store address outside data memory.
    #[error("pc {pc}: data address {address} outside data memory of {size} words")]
    AddressOutOfBounds {
        /// Address of the faulting instruction.
        pc: Word,
        /// The computed effective address.
        address: i64,
        /// Data memory size in words.
        size: usize,
    },

    /// DIV with a zero divisor.
    #[error("pc {pc}: division by zero")]
    DivideByZero {
        /// Address of the faulting instruction.
        pc: Word,
    },

    /// The program neither halted nor drained within the cycle budget.
    #[error("no halt within {0} cycles")]
    CycleLimit(u64),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while building or validating a [`crate::Config`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The free list would start empty or the rename table could not be backed.
    #[error("physical registers ({phys}) must outnumber architectural registers ({arch})")]
    InsufficientPhysRegs {
        /// Configured physical register count.
        phys: usize,
        /// Configured architectural register count.
        arch: usize,
    },

    /// A structure was configured with no capacity.
    #[error("{0} must have a non-zero capacity")]
    ZeroCapacity(&'static str),

    /// The configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
