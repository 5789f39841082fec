//! IPPcode24 common types.
//!
//! This crate provides the foundational data structures shared by the
//! loader, the assembler and the VM:
//!
//! - [`Value`]: runtime value (Int, Bool, Str, Nil, Unassigned)
//! - [`literal`]: lazy decoding of operand text into values
//! - [`Operand`], [`OperandKind`], [`Instruction`]: loaded instructions
//! - [`Opcode`]: the 35 IPPcode24 opcodes and their operand signatures
//! - [`Program`]: the instruction table keyed by order
//! - [`ErrorKind`]: the error taxonomy and its exit codes
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod literal;
pub mod name;
pub mod opcode;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use error::{ErrorKind, LiteralError, NameError};
pub use instruction::{Instruction, Operand, OperandKind};
pub use name::{check_name, FrameKind};
pub use opcode::{Opcode, OperandSlot};
pub use program::Program;
pub use value::Value;
