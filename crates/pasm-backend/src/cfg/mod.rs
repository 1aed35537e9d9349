
use bimap::BiHashMap;
use log::{debug, trace};
use pasm_common::message::Messages;
use pasm_common::program::{InstId, Opcode, Program};

/// The control-flow graph of a program. Every instruction is its own vertex.
#[derive(Debug)]
pub struct ControlFlow {
    succs: Vec<Vec<InstId>>,
    preds: Vec<Vec<InstId>>,
    labels: BiHashMap<String, InstId>,
}

impl ControlFlow {
    pub fn succs(&self, id: InstId) -> &[InstId] {
        &self.succs[id.0]
    }

    pub fn preds(&self, id: InstId) -> &[InstId] {
        &self.preds[id.0]
    }

    /// Get the instruction a label is attached to.
    pub fn resolve(&self, label: &str) -> Option<InstId> {
        self.labels.get_by_left(label).copied()
    }

    pub fn label_of(&self, id: InstId) -> Option<&str> {
        self.labels.get_by_right(&id).map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = (InstId, InstId)> + '_ {
        self.succs
            .iter()
            .enumerate()
            .flat_map(|(from, succs)| succs.iter().map(move |to| (InstId(from), *to)))
    }
}

pub fn control_flow(program: &Program) -> Result<ControlFlow, Messages> {
    debug!("building control flow graph");

    let mut messages = Messages::new();
    let labels = label_map(program, &mut messages);

    let mut edges = Vec::new();

    for (from, inst) in program.iter() {
        let next = program.next(from);

        let target = match inst.target() {
            Some((label, at)) => match labels.get_by_left(label) {
                Some(to) => Some(*to),
                None => {
                    messages.at(at).cfg_unresolved_label(label, inst.line);
                    None
                }
            },
            None => None,
        };

        match inst.opcode {
            Some(opcode) if opcode.is_terminal() => {}

            Some(Opcode::Jump) => edges.extend(target.map(|to| (from, to))),

            Some(Opcode::Call) => {
                edges.extend(target.map(|to| (from, to)));
                edges.extend(next.map(|to| (from, to)));
            }

            Some(Opcode::Branch(_)) => {
                edges.extend(next.map(|to| (from, to)));
                edges.extend(target.map(|to| (from, to)));
            }

            _ => edges.extend(next.map(|to| (from, to))),
        }
    }

    if !messages.is_empty() {
        return Err(messages);
    }

    let mut preds: Vec<Vec<InstId>> = vec![Vec::new(); program.len()];
    let mut succs: Vec<Vec<InstId>> = vec![Vec::new(); program.len()];

    for (from, to) in edges {
        preds[to.0].push(from);
        succs[from.0].push(to);
    }

    trace!("{} instructions, {} labels", program.len(), labels.len());

    Ok(ControlFlow {
        succs,
        preds,
        labels,
    })
}

fn label_map(program: &Program, messages: &mut Messages) -> BiHashMap<String, InstId> {
    let mut labels: BiHashMap<String, InstId> = BiHashMap::new();

    for (id, inst) in program.iter() {
        let Some((label, at)) = &inst.label else {
            continue;
        };

        if let Some(prev) = labels.get_by_left(label.as_str()) {
            if let Some((_, prev_at)) = &program.get(*prev).label {
                messages.at(*at).cfg_duplicate_label(label, *prev_at);
            }
            continue;
        }

        labels.insert(label.clone(), id);
    }

    labels
}
