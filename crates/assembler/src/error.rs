//! Error types for the IPPcode24 assembler.

use thiserror::Error;

/// Exit code for a missing or wrong `.IPPcode24` header.
pub const MISSING_HEADER_EXIT_CODE: i32 = 21;
/// Exit code for an unknown opcode.
pub const UNKNOWN_OPCODE_EXIT_CODE: i32 = 22;
/// Exit code for any other syntax error.
pub const SYNTAX_EXIT_CODE: i32 = 23;

/// Errors produced while translating source text into a program document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// The first non-empty line is not `.IPPcode24`, or there is no line.
    #[error("line {line}: missing .IPPcode24 header")]
    MissingHeader { line: usize },

    /// An unrecognized opcode mnemonic was encountered.
    #[error("line {line}: unknown opcode '{token}'")]
    UnknownOpcode { line: usize, token: String },

    /// An opcode got the wrong number of operands.
    #[error("line {line}: {opcode} expects {expected} operand(s), found {found}")]
    OperandCount {
        line: usize,
        opcode: &'static str,
        expected: usize,
        found: usize,
    },

    /// An operand does not fit its slot.
    #[error("line {line}: invalid operand '{token}': {reason}")]
    InvalidOperand {
        line: usize,
        token: String,
        reason: &'static str,
    },
}

impl AsmError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AsmError::MissingHeader { .. } => MISSING_HEADER_EXIT_CODE,
            AsmError::UnknownOpcode { .. } => UNKNOWN_OPCODE_EXIT_CODE,
            AsmError::OperandCount { .. } | AsmError::InvalidOperand { .. } => SYNTAX_EXIT_CODE,
        }
    }
}
