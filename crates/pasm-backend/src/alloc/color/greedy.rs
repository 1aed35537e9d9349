use std::collections::BTreeMap;

use super::{lowest_free, Colorer, Coloring};
use crate::alloc::interfere::Interference;

/// Sequential coloring with vertices taken by descending degree, ties broken
/// by name.
#[derive(Clone, Copy, Debug, Default)]
pub struct Greedy;

impl Colorer for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn color(&self, graph: &Interference) -> Coloring {
        let mut order: Vec<_> = graph.vertices().collect();
        order.sort_by(|a, b| {
            graph
                .degree(b.as_str())
                .cmp(&graph.degree(a.as_str()))
                .then_with(|| a.cmp(b))
        });

        let mut colors = BTreeMap::new();
        for name in order {
            let color = lowest_free(graph, &colors, name);
            colors.insert(name.clone(), color);
        }

        Coloring::new(colors)
    }
}
