//! Instructions and their operands as produced by the loader.
//!
//! Operand text is kept raw. Opcodes are kept as text as well, so that an
//! unknown opcode is only an error if execution actually reaches it.

use std::collections::BTreeMap;
use std::fmt;

use crate::opcode::Opcode;

/// Declared kind of an operand (the `type` attribute of an `argN` element).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Var,
    Int,
    String,
    Bool,
    Nil,
    Label,
    Type,
    /// Any other non-empty kind name. Rejected when the operand is checked.
    Other(String),
}

impl OperandKind {
    /// Parse a kind name. Unknown names are preserved in [`OperandKind::Other`].
    pub fn parse(name: &str) -> Self {
        match name {
            "var" => OperandKind::Var,
            "int" => OperandKind::Int,
            "string" => OperandKind::String,
            "bool" => OperandKind::Bool,
            "nil" => OperandKind::Nil,
            "label" => OperandKind::Label,
            "type" => OperandKind::Type,
            other => OperandKind::Other(other.to_string()),
        }
    }

    /// The kind name as it appears in the program document.
    pub fn name(&self) -> &str {
        match self {
            OperandKind::Var => "var",
            OperandKind::Int => "int",
            OperandKind::String => "string",
            OperandKind::Bool => "bool",
            OperandKind::Nil => "nil",
            OperandKind::Label => "label",
            OperandKind::Type => "type",
            OperandKind::Other(name) => name,
        }
    }

    /// Returns true for kinds that evaluate to a value: a variable or a
    /// constant of one of the four literal kinds.
    pub fn is_symbol(&self) -> bool {
        matches!(
            self,
            OperandKind::Var
                | OperandKind::Int
                | OperandKind::String
                | OperandKind::Bool
                | OperandKind::Nil
        )
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One instruction operand: declared kind plus trimmed literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub kind: OperandKind,
    pub text: String,
}

impl Operand {
    pub fn new(kind: OperandKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn var(text: impl Into<String>) -> Self {
        Self::new(OperandKind::Var, text)
    }

    pub fn int(value: i64) -> Self {
        Self::new(OperandKind::Int, value.to_string())
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::new(OperandKind::String, text)
    }

    pub fn bool(value: bool) -> Self {
        Self::new(OperandKind::Bool, value.to_string())
    }

    pub fn nil() -> Self {
        Self::new(OperandKind::Nil, "nil")
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::new(OperandKind::Label, text)
    }

    pub fn type_name(text: impl Into<String>) -> Self {
        Self::new(OperandKind::Type, text)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.text)
    }
}

/// A single loaded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Position in the program; unique and at least 1.
    pub order: u32,
    /// Upper-cased opcode text.
    pub opcode: String,
    /// Operands keyed by their 1-based position.
    pub operands: BTreeMap<u32, Operand>,
}

impl Instruction {
    /// Create an instruction whose operands occupy positions 1..=N.
    pub fn new(order: u32, opcode: impl Into<String>, operands: Vec<Operand>) -> Self {
        let operands = (1u32..).zip(operands).collect();
        Self {
            order,
            opcode: opcode.into().to_uppercase(),
            operands,
        }
    }

    /// Resolve the opcode text, if it names a known opcode.
    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_mnemonic(&self.opcode)
    }

    /// The operand at a 1-based position.
    pub fn operand(&self, position: u32) -> Option<&Operand> {
        self.operands.get(&position)
    }
}
