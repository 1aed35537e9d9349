#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use log::debug;
use pasm_common::program::{InstId, Instruction, Line, Opcode, Program, Value};
use pasm_common::register::{Name, Physical};
use pasm_common::Constraints;

use crate::alloc::{Allocation, Liveness};

/// Produce the final code: every register name replaced by a physical
/// register, with spill code and call-site saves inserted in place.
pub fn rewrite(
    constraints: &Constraints,
    program: &Program,
    liveness: &Liveness,
    allocation: &Allocation,
) -> String {
    debug!("rewriting");

    let applier = Applier {
        constraints,
        liveness,
        allocation,
    };

    let mut out = String::new();

    if !allocation.spills.is_empty() {
        let slots: Vec<_> = allocation
            .spills
            .iter()
            .map(|(name, offset)| format!("{name}@{offset}"))
            .collect();
        out.push_str(&format!("# spilled: {}\n", slots.join(" ")));
    }

    for line in program.lines.iter() {
        match line {
            Line::Verbatim(text) => {
                out.push_str(text);
                out.push('\n');
            }

            Line::Instruction(id) => {
                for emitted in applier.apply_inst(*id, program.get(*id)) {
                    out.push_str(&emitted);
                    out.push('\n');
                }
            }
        }
    }

    out
}

struct Applier<'a> {
    constraints: &'a Constraints,
    liveness: &'a Liveness,
    allocation: &'a Allocation,
}

impl Applier<'_> {
    fn apply_inst(&self, id: InstId, inst: &Instruction) -> Vec<String> {
        let mut lines = match inst.opcode {
            None => Vec::new(),
            Some(Opcode::Call) => self.apply_call(id, inst),
            Some(opcode) => self.apply_generic(opcode, inst),
        };

        if let Some(label) = inst.label() {
            match lines.first_mut() {
                Some(first) => *first = format!("{label}: {first}"),
                None => lines.push(format!("{label}:")),
            }
        }

        if let Some(comment) = &inst.comment {
            match lines.first_mut() {
                Some(first) => *first = format!("{first} {comment}"),
                None => lines.push(comment.clone()),
            }
        }

        lines
    }

    /// Save every caller-saved register live across the call, in ascending
    /// order, and restore them in reverse afterwards.
    fn apply_call(&self, id: InstId, inst: &Instruction) -> Vec<String> {
        let sp = self.constraints.stack_pointer;
        let stride = self.constraints.spill_stride;

        let saved: BTreeSet<Physical> = self
            .liveness
            .live_in(id)
            .iter()
            .filter_map(|name| self.allocation.register(name.as_str()))
            .filter(|reg| self.constraints.is_caller_saved(*reg))
            .collect();

        let mut lines = Vec::with_capacity(saved.len() * 4 + 1);

        for reg in saved.iter() {
            lines.push(format!("SUBi {sp} {sp} {stride}"));
            lines.push(format!("ST {reg} {sp}"));
        }

        lines.push(self.substitute(Opcode::Call, inst, &[]));

        for reg in saved.iter().rev() {
            lines.push(format!("LD {reg} {sp}"));
            lines.push(format!("ADDi {sp} {sp} {stride}"));
        }

        lines
    }

    fn apply_generic(&self, opcode: Opcode, inst: &Instruction) -> Vec<String> {
        let spills = &self.allocation.spills;
        let value = self.constraints.scratch_value;
        let address = self.constraints.scratch_address;
        let sp = self.constraints.stack_pointer;

        let killed = inst.kills().find(|name| spills.contains(name.as_str()));

        // A spilled name that is both read and written is loaded into the
        // value register so the store after the instruction finds it there.
        let mut loaded: Vec<&Name> = Vec::new();
        for name in killed.into_iter().filter(|name| inst.gens().any(|read| read == *name)) {
            loaded.push(name);
        }

        for name in inst.gens() {
            if spills.contains(name.as_str()) && !loaded.contains(&name) {
                loaded.push(name);
            }
        }

        let mut scratch: Vec<(&Name, Physical)> = loaded.into_iter().zip([value, address]).collect();
        if let Some(name) = killed {
            if !scratch.iter().any(|(other, _)| *other == name) {
                scratch.push((name, value));
            }
        }

        let mut lines = Vec::new();

        for (name, reg) in scratch.iter() {
            if let Some(offset) = spills.offset(name.as_str()) {
                if inst.gens().any(|read| read == *name) {
                    lines.push(format!("ADDi {address} {sp} {offset}"));
                    lines.push(format!("LD {reg} {address}"));
                }
            }
        }

        lines.push(self.substitute(opcode, inst, &scratch));

        if let Some(offset) = killed.and_then(|name| spills.offset(name.as_str())) {
            lines.push(format!("ADDi {address} {sp} {offset}"));
            lines.push(format!("ST {value} {address}"));
        }

        lines
    }

    fn substitute(&self, opcode: Opcode, inst: &Instruction, scratch: &[(&Name, Physical)]) -> String {
        let mut line = opcode.to_string();

        for operand in inst.operands.iter() {
            line.push(' ');
            match &operand.value {
                Value::Register(name) => line.push_str(&self.register(name, scratch)),
                Value::Immediate(imm) => line.push_str(imm),
                Value::Label(label) => line.push_str(label),
            }
        }

        line
    }

    fn register(&self, name: &Name, scratch: &[(&Name, Physical)]) -> String {
        // Spilled names neither read nor written, such as the ignored
        // operand of a shift.
        let unused = self
            .allocation
            .spills
            .contains(name.as_str())
            .then_some(self.constraints.scratch_address);

        scratch
            .iter()
            .find(|(other, _)| *other == name)
            .map(|(_, reg)| *reg)
            .or_else(|| self.constraints.reserved_register(name.as_str()))
            .or_else(|| self.allocation.register(name.as_str()))
            .or(unused)
            .map(|reg| reg.to_string())
            .unwrap_or_else(|| name.to_string())
    }
}
