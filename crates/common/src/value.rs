//! Runtime value representation for the IPPcode24 VM.
//!
//! Values are what variables hold and what lives on the data stack.

use std::cmp::Ordering;
use std::fmt;

/// Runtime value.
///
/// `Nil` is the value of the `nil@nil` constant. `Unassigned` is held by a
/// variable that was declared with DEFVAR but never written; it never
/// appears on the data stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    Nil,
    Unassigned,
}

impl Value {
    /// The name TYPE reports for this value.
    ///
    /// `Unassigned` is reported as the empty string rather than an error.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Nil => "nil",
            Value::Unassigned => "",
        }
    }

    /// Returns true if both values carry the same tag.
    pub fn same_type(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Ordering used by LT and GT.
    ///
    /// Only values of the same tag are ordered, and `Nil` is never ordered.
    /// Returns `None` when the pair is not comparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Equality used by EQ, JUMPIFEQ and JUMPIFNEQ.
    ///
    /// Values of the same tag compare by content. `Nil` may be compared
    /// against anything and equals only `Nil`. Returns `None` when the pair
    /// is not comparable.
    pub fn equals(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::Nil, _) | (_, Value::Nil) => Some(self == other),
            _ if self.same_type(other) => Some(self == other),
            _ => None,
        }
    }

    /// Number of characters in a string value.
    pub fn char_len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            _ => None,
        }
    }
}

/// Formats the value the way WRITE and DPRINT print it. `Nil` and
/// `Unassigned` print nothing.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Nil | Value::Unassigned => Ok(()),
        }
    }
}
