//! Program representation: the instruction table keyed by order.

use std::collections::BTreeMap;

use crate::instruction::Instruction;

/// A loaded IPPcode24 program.
///
/// Instructions are keyed by their `order` attribute. Orders need not be
/// contiguous; the VM skips the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: BTreeMap<u32, Instruction>,
}

impl Program {
    /// Create a program from a list of instructions.
    ///
    /// A later instruction replaces an earlier one with the same order; the
    /// loader rejects duplicates before this point.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        let instructions = instructions
            .into_iter()
            .map(|instr| (instr.order, instr))
            .collect();
        Self { instructions }
    }

    /// Insert an instruction. Returns the instruction previously stored at
    /// the same order, if any.
    pub fn insert(&mut self, instr: Instruction) -> Option<Instruction> {
        self.instructions.insert(instr.order, instr)
    }

    /// Returns true if an instruction with this order exists.
    pub fn contains(&self, order: u32) -> bool {
        self.instructions.contains_key(&order)
    }

    /// The instruction at `order`, if one exists.
    pub fn get(&self, order: u32) -> Option<&Instruction> {
        self.instructions.get(&order)
    }

    /// The first instruction whose order is `order` or higher.
    pub fn next_from(&self, order: u32) -> Option<&Instruction> {
        self.instructions.range(order..).next().map(|(_, instr)| instr)
    }

    /// Highest order in the program, or 0 for an empty program.
    pub fn max_order(&self) -> u32 {
        self.instructions.keys().next_back().copied().unwrap_or(0)
    }

    /// Instructions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.values()
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
