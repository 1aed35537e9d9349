mod opcode;

#[cfg(test)]
mod tests;

pub use opcode::{AluOp, Condition, Opcode, Slot};

use std::collections::BTreeSet;
use std::fmt;

use crate::message::Span;
use crate::register::Name;

/// Instructions are identified by their position among the instructions of a
/// program, never by their text: two lines may read exactly the same.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct InstId(pub usize);

impl fmt::Display for InstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The instruction store: every line of the input, with the instructions
/// among them kept in an arena.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Program {
    pub lines: Vec<Line>,
    pub instructions: Vec<Instruction>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
    /// A blank line or a comment, reproduced as-is in the output.
    Verbatim(String),
    Instruction(InstId),
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_verbatim(&mut self, text: impl Into<String>) {
        self.lines.push(Line::Verbatim(text.into()));
    }

    pub fn add(&mut self, inst: Instruction) -> InstId {
        let id = InstId(self.instructions.len());
        self.instructions.push(inst);
        self.lines.push(Line::Instruction(id));
        id
    }

    pub fn get(&self, id: InstId) -> &Instruction {
        &self.instructions[id.0]
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn ids(&self) -> impl DoubleEndedIterator<Item = InstId> {
        (0..self.instructions.len()).map(InstId)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (InstId, &Instruction)> {
        self.instructions
            .iter()
            .enumerate()
            .map(|(ndx, inst)| (InstId(ndx), inst))
    }

    /// The instruction following `id`, if any.
    pub fn next(&self, id: InstId) -> Option<InstId> {
        let next = id.0 + 1;
        (next < self.instructions.len()).then_some(InstId(next))
    }

    /// Every register name referenced by any instruction.
    pub fn names(&self) -> BTreeSet<&Name> {
        self.instructions
            .iter()
            .flat_map(|inst| inst.registers())
            .collect()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instruction {
    /// The 1-based line this instruction was read from.
    pub line: usize,
    pub span: Span,
    pub text: String,

    pub label: Option<(String, Span)>,

    /// `None` for a line consisting of only a label.
    pub opcode: Option<Opcode>,
    pub operands: Vec<Operand>,

    /// A trailing `# ...` comment, kept for the output.
    pub comment: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Operand {
    pub value: Value,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    Register(Name),
    Immediate(String),
    Label(String),
}

impl Instruction {
    pub fn label(&self) -> Option<&str> {
        self.label.as_ref().map(|(label, _)| label.as_str())
    }

    /// Pair every operand with the role its position plays.
    pub fn slots(&self) -> impl Iterator<Item = (Slot, &Operand)> {
        let shape = self.opcode.map(|opcode| opcode.shape()).unwrap_or(&[]);
        shape.iter().copied().zip(self.operands.iter())
    }

    /// The registers written by this instruction.
    pub fn kills(&self) -> impl Iterator<Item = &Name> {
        self.registers_in(Slot::Def)
    }

    /// The registers read by this instruction.
    pub fn gens(&self) -> impl Iterator<Item = &Name> {
        self.registers_in(Slot::Use)
    }

    /// Every register operand, in operand order.
    pub fn registers(&self) -> impl Iterator<Item = &Name> {
        self.operands.iter().filter_map(|operand| match &operand.value {
            Value::Register(name) => Some(name),
            _ => None,
        })
    }

    /// The label this instruction may transfer control to.
    pub fn target(&self) -> Option<(&str, Span)> {
        self.operands
            .iter()
            .find_map(|operand| match &operand.value {
                Value::Label(label) => Some((label.as_str(), operand.span)),
                _ => None,
            })
    }

    fn registers_in(&self, wanted: Slot) -> impl Iterator<Item = &Name> {
        self.slots()
            .filter(move |(slot, _)| *slot == wanted)
            .filter_map(|(_, operand)| match &operand.value {
                Value::Register(name) => Some(name),
                _ => None,
            })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(name) => write!(f, "{name}"),
            Self::Immediate(imm) => write!(f, "{imm}"),
            Self::Label(label) => write!(f, "{label}"),
        }
    }
}
