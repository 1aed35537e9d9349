use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};
use pasm_common::program::Program;
use pasm_common::register::{Name, Physical};
use pasm_common::{Constraints, Driver};

use super::check::check_consistency;
use super::color::{Colorer, Coloring};
use super::interfere::{interference, Interference};
use super::liveness::Liveness;

/// The names demoted to memory, each with its offset from the stack pointer,
/// in the order they were spilled.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Spills {
    slots: Vec<(Name, usize)>,
    stride: usize,
}

impl Spills {
    pub fn new(stride: usize) -> Self {
        Self {
            slots: Vec::new(),
            stride,
        }
    }

    /// Spill `name` into the next free slot and return its offset.
    pub fn add(&mut self, name: Name) -> usize {
        assert!(!self.contains(name.as_str()), "{name} spilled twice");

        let offset = self.slots.len() * self.stride;
        self.slots.push((name, offset));
        offset
    }

    pub fn offset(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .find(|(spilled, _)| spilled.as_str() == name)
            .map(|(_, offset)| *offset)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.offset(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, usize)> {
        self.slots.iter().map(|(name, offset)| (name, *offset))
    }

    pub fn names(&self) -> BTreeSet<Name> {
        self.slots.iter().map(|(name, _)| name.clone()).collect()
    }
}

#[derive(Debug)]
pub struct Allocation {
    /// The graph the final coloring was made on.
    pub graph: Interference,
    pub coloring: Coloring,
    pub registers: BTreeMap<Name, Physical>,
    pub spills: Spills,

    /// The number of colors used by every coloring attempt, in order.
    pub history: Vec<usize>,
}

impl Allocation {
    pub fn register(&self, name: &str) -> Option<Physical> {
        self.registers.get(name).copied()
    }

    pub fn iterations(&self) -> usize {
        self.history.len()
    }
}

/// What is left when the allocator gives up.
#[derive(Debug)]
pub struct Failure {
    /// Colors used by the last attempt.
    pub needed: usize,
    pub budget: usize,
    pub graph: Interference,
    pub coloring: Coloring,
    pub spills: Spills,
    pub history: Vec<usize>,
}

impl Failure {
    pub fn iterations(&self) -> usize {
        self.history.len()
    }
}

enum State {
    Coloring,
    NeedsSpill(Interference, Coloring),
    Success(Interference, Coloring),
    Failed(Interference, Coloring),
}

/// Color the program's interference graph, spilling one name at a time until
/// the coloring fits within the register budget or the iteration cap is hit.
pub fn allocate(
    driver: &mut impl Driver,
    constraints: &Constraints,
    colorer: &dyn Colorer,
    program: &Program,
    liveness: &Liveness,
) -> Result<Allocation, Failure> {
    debug!("allocating registers ({} colorer)", colorer.name());

    let budget = constraints.budget();
    let mut spills = Spills::new(constraints.spill_stride);
    let mut history = Vec::new();
    let mut state = State::Coloring;

    loop {
        state = match state {
            State::Coloring => {
                let graph = interference(constraints, program, liveness, &spills.names());
                let coloring = colorer.color(&graph);
                check_consistency(&graph, &coloring);

                history.push(coloring.used);
                trace!(
                    "attempt {}: {} colors for {} names",
                    history.len(),
                    coloring.used,
                    graph.len()
                );

                if coloring.used <= budget {
                    State::Success(graph, coloring)
                } else if history.len() >= constraints.max_spill_iterations {
                    State::Failed(graph, coloring)
                } else {
                    State::NeedsSpill(graph, coloring)
                }
            }

            State::NeedsSpill(graph, coloring) => match choose_spill(&graph) {
                Some(name) => {
                    let conflicts = graph.degree(name.as_str());
                    driver.report_spill(&name, conflicts);

                    let offset = spills.add(name.clone());
                    trace!("spilling {name} to offset {offset} ({conflicts} conflicts)");

                    State::Coloring
                }

                None => State::Failed(graph, coloring),
            },

            State::Success(graph, coloring) => {
                driver.done_spilling(spills.len(), coloring.used);

                let registers = coloring
                    .colors
                    .iter()
                    .filter_map(|(name, color)| {
                        constraints
                            .physical(*color)
                            .map(|physical| (name.clone(), physical))
                    })
                    .collect();

                return Ok(Allocation {
                    graph,
                    coloring,
                    registers,
                    spills,
                    history,
                });
            }

            State::Failed(graph, coloring) => {
                driver.done_spilling(spills.len(), coloring.used);

                return Err(Failure {
                    needed: coloring.used,
                    budget,
                    graph,
                    coloring,
                    spills,
                    history,
                });
            }
        };
    }
}

/// The name with the most conflicts, the smallest such name on a tie.
fn choose_spill(graph: &Interference) -> Option<Name> {
    graph
        .vertices()
        .fold(None, |best: Option<(&Name, usize)>, name| {
            let degree = graph.degree(name.as_str());
            match best {
                Some((_, best_degree)) if best_degree >= degree => best,
                _ => Some((name, degree)),
            }
        })
        .map(|(name, _)| name.clone())
}
