use pasm_common::register::Name;

use super::{Colorer, Coloring, Greedy, Simplify};
use crate::alloc::interfere::Interference;

fn graph(edges: &[(&str, &str)], lonely: &[&str]) -> Interference {
    let mut graph = Interference::new();
    for (a, b) in edges {
        graph.add_edge(&Name::from(*a), &Name::from(*b));
    }

    for name in lonely {
        graph.add_vertex(Name::from(*name));
    }

    graph
}

fn check_proper(graph: &Interference, coloring: &Coloring) {
    assert_eq!(graph.len(), coloring.colors.len());
    for a in graph.vertices() {
        for b in graph.neighbors(a.as_str()) {
            assert_ne!(coloring.get(a.as_str()), coloring.get(b.as_str()));
        }
    }
}

#[test]
fn greedy_colors_a_triangle_with_three_colors() {
    let graph = graph(&[("a", "b"), ("b", "c"), ("c", "a")], &[]);
    let coloring = Greedy.color(&graph);

    check_proper(&graph, &coloring);
    assert_eq!(3, coloring.used);
}

#[test]
fn greedy_takes_high_degree_first() {
    // A star: the hub has the highest degree and gets color 0, every leaf 1.
    let graph = graph(&[("hub", "a"), ("hub", "b"), ("hub", "c")], &[]);
    let coloring = Greedy.color(&graph);

    assert_eq!(Some(0), coloring.get("hub"));
    assert_eq!(Some(1), coloring.get("a"));
    assert_eq!(Some(1), coloring.get("c"));
    assert_eq!(2, coloring.used);
}

#[test]
fn greedy_breaks_ties_by_name() {
    let graph = graph(&[("y", "x")], &[]);
    let coloring = Greedy.color(&graph);

    assert_eq!(Some(0), coloring.get("x"));
    assert_eq!(Some(1), coloring.get("y"));
}

#[test]
fn isolated_vertices_share_a_color() {
    let graph = graph(&[], &["a", "b", "c"]);

    for coloring in [Greedy.color(&graph), Simplify::new(4).color(&graph)] {
        assert_eq!(1, coloring.used);
        assert_eq!(Some(0), coloring.get("b"));
    }
}

#[test]
fn empty_graph_uses_no_colors() {
    let graph = Interference::new();
    assert_eq!(0, Greedy.color(&graph).used);
    assert_eq!(0, Simplify::new(2).color(&graph).used);
}

#[test]
fn simplify_colors_a_cycle_with_two_colors() {
    let graph = graph(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")], &[]);
    let coloring = Simplify::new(2).color(&graph);

    check_proper(&graph, &coloring);
    assert_eq!(2, coloring.used);
}

#[test]
fn simplify_pushes_optimistically_when_stuck() {
    let names = ["a", "b", "c", "d", "e"];
    let mut edges = Vec::new();
    for (ndx, a) in names.iter().enumerate() {
        for b in &names[ndx + 1..] {
            edges.push((*a, *b));
        }
    }

    let graph = graph(&edges, &[]);
    let coloring = Simplify::new(3).color(&graph);

    check_proper(&graph, &coloring);
    assert_eq!(5, coloring.used);
}

#[test]
fn colorers_are_deterministic() {
    let graph = graph(
        &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("d", "e"), ("e", "f")],
        &["g"],
    );

    assert_eq!(Greedy.color(&graph), Greedy.color(&graph));
    assert_eq!(Simplify::new(3).color(&graph), Simplify::new(3).color(&graph));
}
