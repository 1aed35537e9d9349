use std::collections::BTreeMap;

use pasm_common::register::Name;

use super::{lowest_free, Colorer, Coloring};
use crate::alloc::interfere::Interference;

/// Chaitin-style simplify/select: vertices of degree below `registers` are
/// removed first, and when none is left the vertex of highest degree is
/// removed optimistically. Vertices are then colored in reverse removal
/// order.
#[derive(Clone, Copy, Debug)]
pub struct Simplify {
    pub registers: usize,
}

impl Simplify {
    pub fn new(registers: usize) -> Self {
        Self { registers }
    }

    fn pick<'a>(&self, degrees: &BTreeMap<&'a Name, usize>) -> Option<&'a Name> {
        let trivial = degrees
            .iter()
            .find(|(_, degree)| **degree < self.registers)
            .map(|(name, _)| *name);

        // Ties are broken towards the smaller name, which comes first.
        trivial.or_else(|| {
            degrees
                .iter()
                .fold(None, |best: Option<(&'a Name, usize)>, (name, degree)| match best {
                    Some((_, best_degree)) if best_degree >= *degree => best,
                    _ => Some((*name, *degree)),
                })
                .map(|(name, _)| name)
        })
    }
}

impl Colorer for Simplify {
    fn name(&self) -> &'static str {
        "simplify"
    }

    fn color(&self, graph: &Interference) -> Coloring {
        let mut degrees: BTreeMap<&Name, usize> = graph
            .vertices()
            .map(|name| (name, graph.degree(name.as_str())))
            .collect();

        let mut stack = Vec::with_capacity(degrees.len());

        while let Some(name) = self.pick(&degrees) {
            degrees.remove(name);
            stack.push(name);

            for neighbor in graph.neighbors(name.as_str()) {
                if let Some(degree) = degrees.get_mut(neighbor) {
                    *degree -= 1;
                }
            }
        }

        let mut colors = BTreeMap::new();
        while let Some(name) = stack.pop() {
            let color = lowest_free(graph, &colors, name);
            colors.insert(name.clone(), color);
        }

        Coloring::new(colors)
    }
}
