//! Runtime errors for the IPPcode24 VM.
//!
//! Every error raised while executing carries the order (`at`) of the
//! instruction that raised it. Errors found by the label pass before
//! execution carry the order of the offending LABEL.

use ippcode_common::{ErrorKind, FrameKind, LiteralError, NameError, Opcode};
use thiserror::Error;

/// Failures of the frame model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame {0} is not created")]
    NotCreated(FrameKind),

    #[error("variable {0}@{1} is not defined")]
    Undefined(FrameKind, String),

    #[error("variable {0}@{1} is already defined")]
    Redefined(FrameKind, String),
}

impl FrameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FrameError::NotCreated(_) => ErrorKind::FrameAccess,
            FrameError::Undefined(..) => ErrorKind::VariableAccess,
            FrameError::Redefined(..) => ErrorKind::Semantic,
        }
    }
}

/// Errors that occur during label resolution or program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("unknown opcode '{opcode}' at instruction {at}")]
    UnknownOpcode { at: u32, opcode: String },

    #[error("{opcode} takes {arity} operand(s) but arg{position} is present at instruction {at}")]
    UnexpectedOperand {
        at: u32,
        opcode: Opcode,
        arity: usize,
        position: u32,
    },

    #[error("{opcode} is missing arg{position} at instruction {at}")]
    MissingOperand {
        at: u32,
        opcode: Opcode,
        position: u32,
    },

    /// A variable, symbol or label slot holds an operand of another kind.
    #[error("arg{position} of {opcode} must be a {expected}, found '{found}' at instruction {at}")]
    OperandKind {
        at: u32,
        opcode: Opcode,
        position: u32,
        expected: &'static str,
        found: String,
    },

    /// The type slot of READ holds something other than a `type` operand.
    #[error("arg{position} of {opcode} must be a type name, found '{found}' at instruction {at}")]
    NotATypeName {
        at: u32,
        opcode: Opcode,
        position: u32,
        found: String,
    },

    #[error("{source} at instruction {at}")]
    InvalidName { at: u32, source: NameError },

    #[error("variable '{text}' has no frame prefix at instruction {at}")]
    MalformedVariable { at: u32, text: String },

    #[error("variable '{text}' names an unknown frame at instruction {at}")]
    UnknownFrame { at: u32, text: String },

    /// DEFVAR with an unknown frame prefix.
    #[error("cannot declare '{text}': unknown frame at instruction {at}")]
    UnknownDeclarationFrame { at: u32, text: String },

    #[error("{source} at instruction {at}")]
    Frame { at: u32, source: FrameError },

    #[error("variable '{name}' is read before being assigned at instruction {at}")]
    Uninitialized { at: u32, name: String },

    #[error("{source} at instruction {at}")]
    Literal { at: u32, source: LiteralError },

    #[error("label '{label}' is not defined (instruction {at})")]
    UndefinedLabel { at: u32, label: String },

    #[error("label '{label}' is defined twice (instruction {at})")]
    DuplicateLabel { at: u32, label: String },

    #[error("LABEL needs exactly one label operand (instruction {at})")]
    MalformedLabel { at: u32 },

    #[error("operand types do not fit {opcode} at instruction {at}")]
    TypeMismatch { at: u32, opcode: Opcode },

    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: u32 },

    #[error("data stack is empty at instruction {at}")]
    DataStackEmpty { at: u32 },

    #[error("call stack is empty at instruction {at}")]
    CallStackEmpty { at: u32 },

    #[error("exit code {code} is outside 0-9 at instruction {at}")]
    InvalidExitCode { at: u32, code: i64 },

    #[error("READ cannot read type '{name}' at instruction {at}")]
    InvalidReadType { at: u32, name: String },

    #[error("{code} is not a valid character code at instruction {at}")]
    InvalidCodePoint { at: u32, code: i64 },

    #[error("index {index} is out of range for a string of length {length} at instruction {at}")]
    IndexOutOfRange { at: u32, index: i64, length: usize },

    #[error("SETCHAR replacement string is empty at instruction {at}")]
    EmptyReplacement { at: u32 },

    #[error("SETCHAR target does not hold a string at instruction {at}")]
    NotAString { at: u32 },
}

impl RuntimeError {
    /// Classify this error in the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::UnknownOpcode { .. }
            | RuntimeError::UnexpectedOperand { .. }
            | RuntimeError::MissingOperand { .. }
            | RuntimeError::NotATypeName { .. }
            | RuntimeError::UnknownFrame { .. } => ErrorKind::Structure,

            RuntimeError::UndefinedLabel { .. }
            | RuntimeError::DuplicateLabel { .. }
            | RuntimeError::MalformedLabel { .. } => ErrorKind::Semantic,

            RuntimeError::OperandKind { .. } | RuntimeError::TypeMismatch { .. } => {
                ErrorKind::OperandType
            }

            RuntimeError::Frame { source, .. } => source.kind(),

            RuntimeError::Uninitialized { .. }
            | RuntimeError::Literal { .. }
            | RuntimeError::DataStackEmpty { .. }
            | RuntimeError::CallStackEmpty { .. } => ErrorKind::Value,

            RuntimeError::InvalidName { .. }
            | RuntimeError::MalformedVariable { .. }
            | RuntimeError::UnknownDeclarationFrame { .. }
            | RuntimeError::DivisionByZero { .. }
            | RuntimeError::InvalidExitCode { .. }
            | RuntimeError::InvalidReadType { .. } => ErrorKind::OperandValue,

            RuntimeError::InvalidCodePoint { .. }
            | RuntimeError::IndexOutOfRange { .. }
            | RuntimeError::EmptyReplacement { .. }
            | RuntimeError::NotAString { .. } => ErrorKind::StringOperation,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}
