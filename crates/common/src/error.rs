//! Error taxonomy shared by every stage of the IPPcode24 pipeline.
//!
//! Each crate reports failures through its own error enum, but all of them
//! map onto one [`ErrorKind`], which fixes the process exit code.

use thiserror::Error;

/// The kind of failure that terminated loading or execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed program representation (wrong shape, not wrong meaning).
    Structure,
    /// Rule violation detectable without running: duplicate label,
    /// redeclared variable, jump to an undefined label.
    Semantic,
    /// Operand of the wrong kind or a value of the wrong type.
    OperandType,
    /// Access to a variable that was never declared.
    VariableAccess,
    /// Access to a frame that does not exist.
    FrameAccess,
    /// Missing value: unassigned variable, empty stack, bad literal.
    Value,
    /// Operand value outside the accepted domain (division by zero, bad
    /// exit code, malformed name).
    OperandValue,
    /// Invalid string operation (bad index, bad code point).
    StringOperation,
}

/// All error kinds, in exit-code order.
pub const ALL_ERROR_KINDS: [ErrorKind; 8] = [
    ErrorKind::Structure,
    ErrorKind::Semantic,
    ErrorKind::OperandType,
    ErrorKind::VariableAccess,
    ErrorKind::FrameAccess,
    ErrorKind::Value,
    ErrorKind::OperandValue,
    ErrorKind::StringOperation,
];

impl ErrorKind {
    /// Process exit code reported for this kind of failure.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Structure => 32,
            ErrorKind::Semantic => 52,
            ErrorKind::OperandType => 53,
            ErrorKind::VariableAccess => 54,
            ErrorKind::FrameAccess => 55,
            ErrorKind::Value => 56,
            ErrorKind::OperandValue => 57,
            ErrorKind::StringOperation => 58,
        }
    }

    /// Short human-readable description.
    pub fn describe(self) -> &'static str {
        match self {
            ErrorKind::Structure => "invalid source structure",
            ErrorKind::Semantic => "semantic error",
            ErrorKind::OperandType => "operand type error",
            ErrorKind::VariableAccess => "variable access error",
            ErrorKind::FrameAccess => "frame access error",
            ErrorKind::Value => "missing value",
            ErrorKind::OperandValue => "operand value error",
            ErrorKind::StringOperation => "string operation error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// A literal operand whose text does not match its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("invalid int literal '{0}'")]
    Int(String),

    #[error("invalid escape sequence in string literal '{0}'")]
    Escape(String),

    #[error("invalid bool literal '{0}'")]
    Bool(String),

    #[error("invalid nil literal '{0}'")]
    Nil(String),

    /// The operand kind has no literal form (`var`, `label`, or unknown).
    #[error("operand of kind '{0}' cannot be decoded as a value")]
    NotALiteral(String),
}

impl LiteralError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Value
    }
}

/// A variable or label name that breaks the naming rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("empty name")]
    Empty,

    #[error("name '{0}' starts with a digit")]
    LeadingDigit(String),

    #[error("name '{name}' contains illegal character '{ch}'")]
    IllegalChar { name: String, ch: char },
}

impl NameError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::OperandValue
    }
}
