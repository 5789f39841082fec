//! IPPcode24 virtual machine: executes loaded instruction tables.
//!
//! The VM keeps:
//! - a global frame, an optional local frame and an optional temporary frame
//! - a stack of saved local frames
//! - a data stack for PUSHS/POPS
//! - a call stack of return positions for CALL/RETURN
//!
//! Instructions are validated lazily: operand shapes are checked and
//! literals decoded only when an instruction is reached.
//!
//! # Usage
//!
//! ```
//! use ippcode_common::{Instruction, Operand, Program};
//! use ippcode_vm::io::{NoInput, Ports, WriterPort};
//! use ippcode_vm::run;
//!
//! let program = Program::new(vec![
//!     Instruction::new(1, "WRITE", vec![Operand::string("hi\\010")]),
//!     Instruction::new(2, "EXIT", vec![Operand::int(3)]),
//! ]);
//!
//! let mut input = NoInput;
//! let mut output = WriterPort::new(Vec::new());
//! let mut diagnostics = WriterPort::new(Vec::new());
//! let ports = Ports {
//!     input: &mut input,
//!     output: &mut output,
//!     diagnostics: &mut diagnostics,
//! };
//!
//! assert_eq!(run(&program, ports).unwrap(), 3);
//! assert_eq!(output.into_inner(), b"hi\n");
//! ```

pub mod debug;
pub mod error;
pub mod execute;
pub mod frames;
pub mod io;
pub mod labels;
pub mod machine;

pub use error::{FrameError, RuntimeError};
pub use io::{InputPort, OutputPort, Ports};
pub use machine::VM;

use ippcode_common::Program;

/// Execute a program and return its exit code.
///
/// Labels are resolved first, then instructions run in order starting at
/// order 1 until EXIT or until no higher order remains.
///
/// # Errors
///
/// Returns the first [`RuntimeError`]; its [`RuntimeError::kind`] selects
/// the process exit code.
pub fn run(program: &Program, ports: Ports<'_>) -> Result<i32, RuntimeError> {
    let mut vm = VM::new(program, ports);
    vm.execute()
}
