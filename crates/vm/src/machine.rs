//! VM state: frames, stacks, instruction pointer and operand access.

use ippcode_common::literal;
use ippcode_common::{
    check_name, FrameKind, Instruction, Opcode, Operand, OperandKind, OperandSlot, Program, Value,
};

use crate::error::RuntimeError;
use crate::frames::{Memory, VarHandle};
use crate::io::{OutputPort, Ports};
use crate::labels::Labels;

/// The IPPcode24 virtual machine.
pub struct VM<'p, 'io> {
    /// The program being executed.
    pub(crate) program: &'p Program,
    /// Label table, filled by the pre-pass in [`VM::execute`].
    pub(crate) labels: Labels,
    pub(crate) memory: Memory,
    pub(crate) data_stack: Vec<Value>,
    /// Return positions pushed by CALL.
    pub(crate) call_stack: Vec<u64>,
    /// Order of the next instruction to look up.
    pub(crate) ip: u64,
    /// Number of instructions executed so far.
    pub(crate) ic: u64,
    /// Order of the instruction being executed, for error context.
    pub(crate) at: u32,
    pub(crate) ports: Ports<'io>,
}

impl<'p, 'io> VM<'p, 'io> {
    /// Create a VM for the given program, reading and writing through
    /// `ports`.
    pub fn new(program: &'p Program, ports: Ports<'io>) -> Self {
        Self {
            program,
            labels: Labels::default(),
            memory: Memory::new(),
            data_stack: Vec::new(),
            call_stack: Vec::new(),
            ip: 1,
            ic: 0,
            at: 0,
            ports,
        }
    }

    /// Check operand positions and kinds against the opcode signature.
    ///
    /// Positions are visited in ascending order, so the first offending
    /// operand decides the error.
    pub(crate) fn check_operands(
        &self,
        instr: &Instruction,
        opcode: Opcode,
    ) -> Result<(), RuntimeError> {
        let at = instr.order;
        let signature = opcode.signature();

        for (&position, operand) in &instr.operands {
            let slot = position
                .checked_sub(1)
                .and_then(|index| signature.get(index as usize))
                .ok_or(RuntimeError::UnexpectedOperand {
                    at,
                    opcode,
                    arity: signature.len(),
                    position,
                })?;
            let kind_error = |expected| RuntimeError::OperandKind {
                at,
                opcode,
                position,
                expected,
                found: operand.kind.to_string(),
            };
            match slot {
                OperandSlot::Var if operand.kind != OperandKind::Var => {
                    return Err(kind_error("variable"));
                }
                OperandSlot::Symb if !operand.kind.is_symbol() => {
                    return Err(kind_error("symbol"));
                }
                OperandSlot::Label => {
                    if operand.kind != OperandKind::Label {
                        return Err(kind_error("label"));
                    }
                    check_name(&operand.text)
                        .map_err(|source| RuntimeError::InvalidName { at, source })?;
                }
                OperandSlot::Type if operand.kind != OperandKind::Type => {
                    return Err(RuntimeError::NotATypeName {
                        at,
                        opcode,
                        position,
                        found: operand.kind.to_string(),
                    });
                }
                _ => {}
            }
        }

        for position in 1..=signature.len() as u32 {
            if !instr.operands.contains_key(&position) {
                return Err(RuntimeError::MissingOperand {
                    at,
                    opcode,
                    position,
                });
            }
        }
        Ok(())
    }

    /// The operand at `position`; present once [`Self::check_operands`]
    /// has passed.
    pub(crate) fn arg<'i>(
        &self,
        instr: &'i Instruction,
        opcode: Opcode,
        position: u32,
    ) -> Result<&'i Operand, RuntimeError> {
        instr.operand(position).ok_or(RuntimeError::MissingOperand {
            at: self.at,
            opcode,
            position,
        })
    }

    /// Split `FRAME@name` and validate the name.
    fn split_var<'t>(&self, text: &'t str) -> Result<(&'t str, &'t str), RuntimeError> {
        let at = self.at;
        let (prefix, name) = text
            .split_once('@')
            .ok_or_else(|| RuntimeError::MalformedVariable {
                at,
                text: text.to_string(),
            })?;
        check_name(name).map_err(|source| RuntimeError::InvalidName { at, source })?;
        Ok((prefix, name))
    }

    /// Resolve a declared variable without requiring it to be assigned.
    pub(crate) fn var_handle(&self, operand: &Operand) -> Result<VarHandle, RuntimeError> {
        let at = self.at;
        let (prefix, name) = self.split_var(&operand.text)?;
        let frame = FrameKind::from_prefix(prefix).ok_or_else(|| RuntimeError::UnknownFrame {
            at,
            text: operand.text.clone(),
        })?;
        self.memory
            .lookup(frame, name)
            .map_err(|source| RuntimeError::Frame { at, source })
    }

    /// DEFVAR.
    pub(crate) fn declare(&mut self, operand: &Operand) -> Result<(), RuntimeError> {
        let at = self.at;
        let (prefix, name) = self.split_var(&operand.text)?;
        let frame = FrameKind::from_prefix(prefix).ok_or_else(|| {
            RuntimeError::UnknownDeclarationFrame {
                at,
                text: operand.text.clone(),
            }
        })?;
        self.memory
            .declare(frame, name)
            .map(|_| ())
            .map_err(|source| RuntimeError::Frame { at, source })
    }

    pub(crate) fn load(&self, handle: VarHandle) -> Result<&Value, RuntimeError> {
        let at = self.at;
        self.memory
            .get(handle)
            .map_err(|source| RuntimeError::Frame { at, source })
    }

    pub(crate) fn store(&mut self, handle: VarHandle, value: Value) -> Result<(), RuntimeError> {
        let at = self.at;
        self.memory
            .set(handle, value)
            .map_err(|source| RuntimeError::Frame { at, source })
    }

    /// Value of a symbol operand; `Unassigned` is returned as is.
    pub(crate) fn eval_raw(&self, operand: &Operand) -> Result<Value, RuntimeError> {
        match operand.kind {
            OperandKind::Var => {
                let handle = self.var_handle(operand)?;
                self.load(handle).cloned()
            }
            ref kind => literal::decode(kind, &operand.text)
                .map_err(|source| RuntimeError::Literal { at: self.at, source }),
        }
    }

    /// Value of a symbol operand, which must be assigned.
    pub(crate) fn eval(&self, operand: &Operand) -> Result<Value, RuntimeError> {
        match self.eval_raw(operand)? {
            Value::Unassigned => Err(RuntimeError::Uninitialized {
                at: self.at,
                name: operand.text.clone(),
            }),
            value => Ok(value),
        }
    }

    pub(crate) fn eval_int(&self, operand: &Operand, opcode: Opcode) -> Result<i64, RuntimeError> {
        match self.eval(operand)? {
            Value::Int(n) => Ok(n),
            _ => Err(self.type_mismatch(opcode)),
        }
    }

    pub(crate) fn eval_bool(&self, operand: &Operand, opcode: Opcode) -> Result<bool, RuntimeError> {
        match self.eval(operand)? {
            Value::Bool(b) => Ok(b),
            _ => Err(self.type_mismatch(opcode)),
        }
    }

    pub(crate) fn eval_str(&self, operand: &Operand, opcode: Opcode) -> Result<String, RuntimeError> {
        match self.eval(operand)? {
            Value::Str(s) => Ok(s),
            _ => Err(self.type_mismatch(opcode)),
        }
    }

    pub(crate) fn type_mismatch(&self, opcode: Opcode) -> RuntimeError {
        RuntimeError::TypeMismatch { at: self.at, opcode }
    }

    /// Order of the LABEL named by a label operand.
    pub(crate) fn label_target(&self, operand: &Operand) -> Result<u64, RuntimeError> {
        self.labels
            .get(&operand.text)
            .map(u64::from)
            .ok_or_else(|| RuntimeError::UndefinedLabel {
                at: self.at,
                label: operand.text.clone(),
            })
    }

    /// Character at `index`, counting characters rather than bytes.
    pub(crate) fn char_at(&self, text: &str, index: i64) -> Result<char, RuntimeError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| text.chars().nth(i))
            .ok_or_else(|| RuntimeError::IndexOutOfRange {
                at: self.at,
                index,
                length: text.chars().count(),
            })
    }
}

/// Write a value the way WRITE and DPRINT print it.
pub(crate) fn write_value(port: &mut dyn OutputPort, value: &Value) {
    match value {
        Value::Int(n) => port.write_int(*n),
        Value::Bool(b) => port.write_bool(*b),
        Value::Str(s) => port.write_string(s),
        Value::Nil | Value::Unassigned => {}
    }
}
