//! Parser for IPPcode24 source words → `instruction` elements.
//!
//! Each operand is checked against the slot the opcode signature gives it.

use ippcode_common::literal::{parse_bool, parse_int, parse_nil, parse_string};
use ippcode_common::{check_name, FrameKind, Opcode, OperandKind, OperandSlot};
use ippcode_loader::Element;

use crate::error::AsmError;

/// The header every source file starts with.
pub(crate) const HEADER: &str = ".IPPcode24";

/// Returns true if the words of a line form the header.
pub(crate) fn is_header(tokens: &[&str]) -> bool {
    tokens
        .first()
        .is_some_and(|word| word.eq_ignore_ascii_case(HEADER))
}

/// Parse the words of one non-empty line into an `instruction` element.
pub(crate) fn parse_line(tokens: &[&str], line: usize, order: u32) -> Result<Element, AsmError> {
    let Some((&mnemonic, operands)) = tokens.split_first() else {
        return Err(AsmError::UnknownOpcode {
            line,
            token: String::new(),
        });
    };

    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| AsmError::UnknownOpcode {
        line,
        token: mnemonic.to_string(),
    })?;

    let signature = opcode.signature();
    if operands.len() != signature.len() {
        return Err(AsmError::OperandCount {
            line,
            opcode: opcode.mnemonic(),
            expected: signature.len(),
            found: operands.len(),
        });
    }

    let mut element = Element::new("instruction")
        .with_attr("order", order.to_string())
        .with_attr("opcode", opcode.mnemonic());

    for (position, (&slot, &token)) in (1..).zip(signature.iter().zip(operands)) {
        let (kind, text) = parse_operand(slot, token).map_err(|reason| AsmError::InvalidOperand {
            line,
            token: token.to_string(),
            reason,
        })?;
        element = element.with_child(
            Element::new(format!("arg{position}"))
                .with_attr("type", kind.name())
                .with_text(text),
        );
    }
    Ok(element)
}

/// Classify one operand word for its slot.
fn parse_operand(slot: OperandSlot, token: &str) -> Result<(OperandKind, &str), &'static str> {
    match slot {
        OperandSlot::Var => {
            check_variable(token)?;
            Ok((OperandKind::Var, token))
        }
        OperandSlot::Symb => {
            if check_variable(token).is_ok() {
                return Ok((OperandKind::Var, token));
            }
            parse_constant(token)
        }
        OperandSlot::Label => {
            check_name(token).map_err(|_| "invalid label name")?;
            Ok((OperandKind::Label, token))
        }
        OperandSlot::Type => match token {
            "int" | "string" | "bool" => Ok((OperandKind::Type, token)),
            _ => Err("type must be int, string or bool"),
        },
    }
}

fn check_variable(token: &str) -> Result<(), &'static str> {
    let (frame, name) = token.split_once('@').ok_or("missing frame prefix")?;
    FrameKind::from_prefix(frame).ok_or("invalid frame prefix")?;
    check_name(name).map_err(|_| "invalid variable name")
}

fn parse_constant(token: &str) -> Result<(OperandKind, &str), &'static str> {
    let (kind, value) = token.split_once('@').ok_or("not a variable or constant")?;
    let kind = match kind {
        "int" => {
            parse_int(value).map_err(|_| "invalid integer")?;
            OperandKind::Int
        }
        "bool" => {
            parse_bool(value).map_err(|_| "bool must be true or false")?;
            OperandKind::Bool
        }
        "nil" => {
            parse_nil(value).map_err(|_| "nil must be nil")?;
            OperandKind::Nil
        }
        "string" => {
            parse_string(value).map_err(|_| "invalid escape sequence")?;
            OperandKind::String
        }
        _ => return Err("unknown constant type"),
    };
    Ok((kind, value))
}
