//! A coherence check ensuring no two interfering names were given the same
//! color.

use super::color::Coloring;
use super::interfere::Interference;

pub fn check_consistency(graph: &Interference, coloring: &Coloring) {
    for (name, interferes) in graph.graph.iter() {
        let Some(this) = coloring.get(name.as_str()) else {
            panic!("inconsistency: {name} was never colored");
        };

        for other_name in interferes.iter() {
            if coloring.get(other_name.as_str()) == Some(this) {
                panic!("inconsistency: both {name} and {other_name} were colored the same, but they interfere (on {this})");
            }
        }
    }
}
