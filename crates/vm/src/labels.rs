//! Label pre-pass.
//!
//! Every LABEL instruction is visited once before execution starts, so jumps
//! may target labels defined later in the program.

use std::collections::HashMap;

use ippcode_common::{check_name, OperandKind, Program};
use tracing::debug;

use crate::error::RuntimeError;

/// Label name → order of its LABEL instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    targets: HashMap<String, u32>,
}

impl Labels {
    pub fn get(&self, name: &str) -> Option<u32> {
        self.targets.get(name).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.targets.len()
    }
}

/// Build the label table.
///
/// A LABEL must carry exactly one operand, `arg1` of kind `label`, with a
/// name not used by another LABEL.
pub fn resolve_labels(program: &Program) -> Result<Labels, RuntimeError> {
    let mut labels = Labels::default();
    for instr in program.iter().filter(|i| i.opcode == "LABEL") {
        let at = instr.order;
        let operand = match instr.operand(1) {
            Some(op) if instr.operands.len() == 1 && op.kind == OperandKind::Label => op,
            _ => return Err(RuntimeError::MalformedLabel { at }),
        };
        if labels.targets.contains_key(&operand.text) {
            return Err(RuntimeError::DuplicateLabel {
                at,
                label: operand.text.clone(),
            });
        }
        check_name(&operand.text).map_err(|source| RuntimeError::InvalidName { at, source })?;
        labels.targets.insert(operand.text.clone(), at);
    }
    debug!(labels = labels.len(), "labels resolved");
    Ok(labels)
}
