//! Element tree → instruction table.
//!
//! Only the document shape is checked here. Opcodes, operand counts and
//! operand kinds are validated by the VM when an instruction is reached, so
//! an invalid instruction that never executes does not fail the program.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use ippcode_common::{Instruction, Operand, OperandKind, Program};
use tracing::debug;

use crate::error::LoadError;
use crate::tree::Element;

/// Required value of the root `language` attribute.
pub const LANGUAGE: &str = "IPPcode24";

/// Load a program from its element tree.
///
/// Returns the first structural error encountered.
pub fn load(root: &Element) -> Result<Program, LoadError> {
    if root.name != "program" {
        return Err(LoadError::RootElement {
            found: root.name.clone(),
        });
    }
    match root.attr("language") {
        Some(LANGUAGE) => {}
        other => {
            return Err(LoadError::Language {
                found: other.map(str::to_string),
            })
        }
    }

    let mut program = Program::default();
    for node in &root.children {
        let instr = load_instruction(node)?;
        let order = instr.order;
        if program.contains(order) {
            return Err(LoadError::DuplicateOrder { order });
        }
        program.insert(instr);
    }

    debug!(
        instructions = program.len(),
        max_order = program.max_order(),
        "program loaded"
    );
    Ok(program)
}

fn load_instruction(node: &Element) -> Result<Instruction, LoadError> {
    if node.name != "instruction" {
        return Err(LoadError::UnexpectedElement {
            parent: "program".to_string(),
            found: node.name.clone(),
        });
    }

    let order_text = required_attr(node, "order")?;
    let opcode = required_attr(node, "opcode")?.to_uppercase();
    let order = parse_order(order_text)?;
    if opcode.is_empty() {
        return Err(LoadError::EmptyOpcode { order });
    }

    let mut operands = BTreeMap::new();
    for arg in &node.children {
        let position = parse_arg_position(&arg.name).ok_or_else(|| LoadError::InvalidArgument {
            order,
            name: arg.name.clone(),
        })?;
        let slot = match operands.entry(position) {
            Entry::Occupied(_) => return Err(LoadError::DuplicateArgument { order, position }),
            Entry::Vacant(slot) => slot,
        };
        let kind = match arg.attr("type").map(str::trim) {
            Some(kind) if !kind.is_empty() => OperandKind::parse(kind),
            _ => return Err(LoadError::MissingType { order, position }),
        };
        slot.insert(Operand::new(kind, arg.text.trim()));
    }

    Ok(Instruction {
        order,
        opcode,
        operands,
    })
}

fn required_attr<'a>(node: &'a Element, attribute: &'static str) -> Result<&'a str, LoadError> {
    node.attr(attribute).ok_or_else(|| LoadError::MissingAttribute {
        element: node.name.clone(),
        attribute,
    })
}

fn parse_order(text: &str) -> Result<u32, LoadError> {
    match text.trim().parse::<u32>() {
        Ok(order) if order >= 1 => Ok(order),
        _ => Err(LoadError::InvalidOrder {
            text: text.to_string(),
        }),
    }
}

/// `argN` → `N`, where N is a positive decimal integer.
fn parse_arg_position(name: &str) -> Option<u32> {
    let digits = name.strip_prefix("arg")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|&n| n > 0)
}
