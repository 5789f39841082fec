//! Main execution loop and opcode dispatch for the IPPcode24 VM.

use ippcode_common::{Instruction, Opcode, Value};
use tracing::{debug, trace};

use crate::error::{FrameError, RuntimeError};
use crate::frames::Memory;
use crate::labels::resolve_labels;
use crate::machine::{write_value, VM};

impl<'p, 'io> VM<'p, 'io> {
    /// Execute the program until EXIT or until no instruction is left at
    /// or after the instruction pointer. Returns the program's exit code.
    pub fn execute(&mut self) -> Result<i32, RuntimeError> {
        self.labels = resolve_labels(self.program)?;
        let program = self.program;

        loop {
            let next = u32::try_from(self.ip)
                .ok()
                .and_then(|ip| program.next_from(ip));
            let Some(instr) = next else {
                debug!(executed = self.ic, "program finished");
                return Ok(0);
            };
            self.ip = u64::from(instr.order) + 1;
            self.ic += 1;
            self.at = instr.order;
            trace!(order = instr.order, opcode = %instr.opcode, "execute");

            if let Some(code) = self.step(instr)? {
                debug!(exit_code = code, executed = self.ic, "program exited");
                return Ok(code);
            }
        }
    }

    /// Execute one instruction. Returns `Some(code)` when it was EXIT.
    fn step(&mut self, instr: &Instruction) -> Result<Option<i32>, RuntimeError> {
        let opcode = instr.opcode().ok_or_else(|| RuntimeError::UnknownOpcode {
            at: instr.order,
            opcode: instr.opcode.clone(),
        })?;
        self.check_operands(instr, opcode)?;
        let arg = |position| self.arg(instr, opcode, position);

        match opcode {
            // Frames and variables
            Opcode::Move => {
                let dest = self.var_handle(arg(1)?)?;
                let value = self.eval(arg(2)?)?;
                self.store(dest, value)?;
            }
            Opcode::CreateFrame => self.memory.create_temporary(),
            Opcode::PushFrame => self.frame_op(|memory| memory.push_frame())?,
            Opcode::PopFrame => self.frame_op(|memory| memory.pop_frame())?,
            Opcode::DefVar => {
                let operand = arg(1)?;
                self.declare(operand)?;
            }

            // Calls
            Opcode::Call => {
                let target = self.label_target(arg(1)?)?;
                self.call_stack.push(self.ip);
                self.ip = target;
            }
            Opcode::Return => {
                self.ip = self
                    .call_stack
                    .pop()
                    .ok_or(RuntimeError::CallStackEmpty { at: self.at })?;
            }

            // Data stack
            Opcode::PushS => {
                let value = self.eval(arg(1)?)?;
                self.data_stack.push(value);
            }
            Opcode::PopS => {
                let dest = self.var_handle(arg(1)?)?;
                let value = self
                    .data_stack
                    .pop()
                    .ok_or(RuntimeError::DataStackEmpty { at: self.at })?;
                self.store(dest, value)?;
            }

            // Arithmetic
            Opcode::Add => self.exec_arith(instr, opcode, |a, b| Ok(a.wrapping_add(b)))?,
            Opcode::Sub => self.exec_arith(instr, opcode, |a, b| Ok(a.wrapping_sub(b)))?,
            Opcode::Mul => self.exec_arith(instr, opcode, |a, b| Ok(a.wrapping_mul(b)))?,
            Opcode::IDiv => {
                let at = self.at;
                self.exec_arith(instr, opcode, |a, b| {
                    if b == 0 {
                        Err(RuntimeError::DivisionByZero { at })
                    } else {
                        Ok(a.wrapping_div(b))
                    }
                })?
            }

            // Relational
            Opcode::Lt | Opcode::Gt => {
                let dest = self.var_handle(arg(1)?)?;
                let a = self.eval(arg(2)?)?;
                let b = self.eval(arg(3)?)?;
                let ordering = a.compare(&b).ok_or_else(|| self.type_mismatch(opcode))?;
                let result = if opcode == Opcode::Lt {
                    ordering.is_lt()
                } else {
                    ordering.is_gt()
                };
                self.store(dest, Value::Bool(result))?;
            }
            Opcode::Eq => {
                let dest = self.var_handle(arg(1)?)?;
                let a = self.eval(arg(2)?)?;
                let b = self.eval(arg(3)?)?;
                let equal = a.equals(&b).ok_or_else(|| self.type_mismatch(opcode))?;
                self.store(dest, Value::Bool(equal))?;
            }

            // Logic
            Opcode::And | Opcode::Or => {
                let dest = self.var_handle(arg(1)?)?;
                let a = self.eval_bool(arg(2)?, opcode)?;
                let b = self.eval_bool(arg(3)?, opcode)?;
                let result = if opcode == Opcode::And { a && b } else { a || b };
                self.store(dest, Value::Bool(result))?;
            }
            Opcode::Not => {
                let dest = self.var_handle(arg(1)?)?;
                let a = self.eval_bool(arg(2)?, opcode)?;
                self.store(dest, Value::Bool(!a))?;
            }

            // Strings
            Opcode::Int2Char => {
                let dest = self.var_handle(arg(1)?)?;
                let code = self.eval_int(arg(2)?, opcode)?;
                let ch = u32::try_from(code)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(RuntimeError::InvalidCodePoint { at: self.at, code })?;
                self.store(dest, Value::Str(ch.to_string()))?;
            }
            Opcode::Stri2Int => {
                let dest = self.var_handle(arg(1)?)?;
                let text = self.eval_str(arg(2)?, opcode)?;
                let index = self.eval_int(arg(3)?, opcode)?;
                let ch = self.char_at(&text, index)?;
                self.store(dest, Value::Int(i64::from(u32::from(ch))))?;
            }
            Opcode::Concat => {
                let dest = self.var_handle(arg(1)?)?;
                let mut text = self.eval_str(arg(2)?, opcode)?;
                text.push_str(&self.eval_str(arg(3)?, opcode)?);
                self.store(dest, Value::Str(text))?;
            }
            Opcode::StrLen => {
                let dest = self.var_handle(arg(1)?)?;
                let length = self
                    .eval(arg(2)?)?
                    .char_len()
                    .ok_or_else(|| self.type_mismatch(opcode))?;
                let length = i64::try_from(length).unwrap_or(i64::MAX);
                self.store(dest, Value::Int(length))?;
            }
            Opcode::GetChar => {
                let dest = self.var_handle(arg(1)?)?;
                let text = self.eval_str(arg(2)?, opcode)?;
                let index = self.eval_int(arg(3)?, opcode)?;
                let ch = self.char_at(&text, index)?;
                self.store(dest, Value::Str(ch.to_string()))?;
            }
            Opcode::SetChar => self.exec_setchar(instr, opcode)?,

            // I/O
            Opcode::Read => {
                let dest = self.var_handle(arg(1)?)?;
                let type_name = &arg(2)?.text;
                let input = &mut *self.ports.input;
                let value = match type_name.as_str() {
                    "int" => input.read_int().map(Value::Int),
                    "string" => input.read_string().map(Value::Str),
                    "bool" => input.read_bool().map(Value::Bool),
                    _ => {
                        return Err(RuntimeError::InvalidReadType {
                            at: self.at,
                            name: type_name.clone(),
                        })
                    }
                };
                self.store(dest, value.unwrap_or(Value::Nil))?;
            }
            Opcode::Write => {
                let value = self.eval(arg(1)?)?;
                write_value(self.ports.output, &value);
            }
            Opcode::Type => {
                let dest = self.var_handle(arg(1)?)?;
                let value = self.eval_raw(arg(2)?)?;
                self.store(dest, Value::Str(value.type_name().to_string()))?;
            }

            // Control flow
            Opcode::Label => {}
            Opcode::Jump => {
                self.ip = self.label_target(arg(1)?)?;
            }
            Opcode::JumpIfEq | Opcode::JumpIfNeq => {
                let a = self.eval(arg(2)?)?;
                let b = self.eval(arg(3)?)?;
                let target = self.label_target(arg(1)?)?;
                let equal = a.equals(&b).ok_or_else(|| self.type_mismatch(opcode))?;
                if equal == (opcode == Opcode::JumpIfEq) {
                    self.ip = target;
                }
            }
            Opcode::Exit => {
                let code = self.eval_int(arg(1)?, opcode)?;
                return match i32::try_from(code) {
                    Ok(code @ 0..=9) => Ok(Some(code)),
                    _ => Err(RuntimeError::InvalidExitCode { at: self.at, code }),
                };
            }

            // Debugging
            Opcode::DPrint => {
                let value = self.eval(arg(1)?)?;
                write_value(self.ports.diagnostics, &value);
            }
            Opcode::Break => self.dump_state(),
        }
        Ok(None)
    }

    fn frame_op(
        &mut self,
        op: impl FnOnce(&mut Memory) -> Result<(), FrameError>,
    ) -> Result<(), RuntimeError> {
        let at = self.at;
        op(&mut self.memory).map_err(|source| RuntimeError::Frame { at, source })
    }

    /// ADD, SUB, MUL and IDIV: `V := op(S, S)` over integers.
    fn exec_arith(
        &mut self,
        instr: &Instruction,
        opcode: Opcode,
        op: impl FnOnce(i64, i64) -> Result<i64, RuntimeError>,
    ) -> Result<(), RuntimeError> {
        let dest = self.var_handle(self.arg(instr, opcode, 1)?)?;
        let a = self.eval_int(self.arg(instr, opcode, 2)?, opcode)?;
        let b = self.eval_int(self.arg(instr, opcode, 3)?, opcode)?;
        let result = op(a, b)?;
        self.store(dest, Value::Int(result))
    }

    /// SETCHAR: replace one character of the string held by the destination.
    fn exec_setchar(&mut self, instr: &Instruction, opcode: Opcode) -> Result<(), RuntimeError> {
        let at = self.at;
        let dest = self.var_handle(self.arg(instr, opcode, 1)?)?;
        let index = self.eval_int(self.arg(instr, opcode, 2)?, opcode)?;
        let replacement = self.eval_str(self.arg(instr, opcode, 3)?, opcode)?;

        let Value::Str(current) = self.load(dest)? else {
            return Err(RuntimeError::NotAString { at });
        };
        self.char_at(current, index)?;
        let with = replacement
            .chars()
            .next()
            .ok_or(RuntimeError::EmptyReplacement { at })?;

        let position = usize::try_from(index).unwrap_or(usize::MAX);
        let updated: String = current
            .chars()
            .enumerate()
            .map(|(i, ch)| if i == position { with } else { ch })
            .collect();
        self.store(dest, Value::Str(updated))
    }
}
