use std::collections::{BTreeMap, BTreeSet};

use log::trace;
use pasm_common::program::Program;
use pasm_common::register::Name;
use pasm_common::Constraints;

use super::liveness::{LiveSet, Liveness};

/// An undirected graph over register names. An edge means the two names may
/// not share a physical register.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Interference {
    pub graph: BTreeMap<Name, BTreeSet<Name>>,
}

impl Interference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, name: Name) {
        self.graph.entry(name).or_default();
    }

    pub fn add_edge(&mut self, a: &Name, b: &Name) {
        assert_ne!(a, b, "interference graphs have no self-loops");
        self.graph.entry(a.clone()).or_default().insert(b.clone());
        self.graph.entry(b.clone()).or_default().insert(a.clone());
    }

    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        self.graph
            .get(a)
            .map(|neighbors| neighbors.contains(b))
            .unwrap_or(false)
    }

    pub fn degree(&self, name: &str) -> usize {
        self.graph.get(name).map(BTreeSet::len).unwrap_or(0)
    }

    pub fn neighbors(&self, name: &str) -> impl Iterator<Item = &Name> {
        self.graph.get(name).into_iter().flatten()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Name> {
        self.graph.keys()
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.values().map(BTreeSet::len).sum::<usize>() / 2
    }
}

/// Build the interference graph of a program, leaving out every name in
/// `excluded` as well as the reserved registers.
pub fn interference(
    constraints: &Constraints,
    program: &Program,
    liveness: &Liveness,
    excluded: &BTreeSet<Name>,
) -> Interference {
    let keep = |name: &Name| !excluded.contains(name) && !constraints.is_reserved(name.as_str());
    let mut graph = Interference::new();

    for name in program.names() {
        if keep(name) {
            graph.add_vertex(name.clone());
        }
    }

    for id in program.ids() {
        let kills: LiveSet = liveness
            .kills(id)
            .iter()
            .filter(|name| keep(*name))
            .cloned()
            .collect();

        let live: LiveSet = liveness
            .live_out(id)
            .clone()
            .relative_complement(kills.clone())
            .into_iter()
            .filter(|name| keep(name))
            .collect();

        for killed in kills.iter() {
            for other in live.iter() {
                graph.add_edge(killed, other);
            }
        }
    }

    trace!(
        "interference graph has {} vertices and {} edges",
        graph.len(),
        graph.edge_count()
    );

    graph
}
