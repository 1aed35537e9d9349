mod greedy;
mod simplify;

#[cfg(test)]
mod tests;

pub use greedy::Greedy;
pub use simplify::Simplify;

use std::collections::{BTreeMap, BTreeSet};

use pasm_common::register::Name;

use super::interfere::Interference;

/// A strategy for coloring an interference graph.
pub trait Colorer {
    fn name(&self) -> &'static str;

    /// Color every vertex of `graph` such that no two neighbors share a color.
    fn color(&self, graph: &Interference) -> Coloring;
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Coloring {
    pub colors: BTreeMap<Name, usize>,

    /// The number of distinct colors in use.
    pub used: usize,
}

impl Coloring {
    pub fn new(colors: BTreeMap<Name, usize>) -> Self {
        let used = colors.values().collect::<BTreeSet<_>>().len();
        Self { colors, used }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.colors.get(name).copied()
    }
}

/// The smallest color not taken by any already colored neighbor of `name`.
fn lowest_free(graph: &Interference, colors: &BTreeMap<Name, usize>, name: &Name) -> usize {
    let taken: BTreeSet<usize> = graph
        .neighbors(name.as_str())
        .filter_map(|neighbor| colors.get(neighbor).copied())
        .collect();

    (0..).find(|color| !taken.contains(color)).unwrap_or(0)
}
