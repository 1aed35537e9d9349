use std::io::{self, Write};

use console::style;
use pasm_backend::alloc::{Coloring, Interference, LiveSet, Spills};
use pasm_backend::{Compiled, Outcome};
use pasm_common::program::{InstId, Program};
use pasm_common::Constraints;

/// Write a human-readable account of the allocation.
pub fn report(
    out: &mut impl Write,
    constraints: &Constraints,
    strategy: &str,
    program: &Program,
    compiled: &Compiled,
) -> io::Result<()> {
    heading(out, "control flow")?;
    for (id, inst) in program.iter() {
        let succs: Vec<_> = compiled
            .cfg
            .succs(id)
            .iter()
            .map(|succ| target(compiled, *succ))
            .collect();

        writeln!(
            out,
            "  {:>5}  {:<24} -> {}",
            id.to_string(),
            inst.text,
            succs.join(", ")
        )?;
    }

    heading(out, "liveness")?;
    for id in program.ids() {
        writeln!(
            out,
            "  {:>5}  in {}  out {}",
            id.to_string(),
            names(compiled.liveness.live_in(id)),
            names(compiled.liveness.live_out(id))
        )?;
    }
    writeln!(out, "  fixed point after {} passes", compiled.liveness.passes())?;

    let (graph, coloring, spills, history) = match &compiled.outcome {
        Outcome::Allocated { allocation, .. } => (
            &allocation.graph,
            &allocation.coloring,
            &allocation.spills,
            &allocation.history,
        ),
        Outcome::Failed(failure) => (
            &failure.graph,
            &failure.coloring,
            &failure.spills,
            &failure.history,
        ),
    };

    interference(out, graph)?;

    heading(out, "coloring")?;
    writeln!(
        out,
        "  {} colors used of {} ({strategy}), {} attempt(s): {}",
        style(coloring.used).for_stderr().bold(),
        constraints.budget(),
        history.len(),
        history
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(" -> ")
    )?;

    spilled(out, spills)?;

    heading(out, "registers")?;
    match &compiled.outcome {
        Outcome::Allocated { allocation, .. } => {
            for (name, reg) in allocation.registers.iter() {
                writeln!(out, "  {name:>8} -> {reg}")?;
            }
        }

        Outcome::Failed(_) => colors(out, coloring)?,
    }

    for (name, reg) in constraints.reserved.iter() {
        writeln!(
            out,
            "  {name:>8} -> {reg} {}",
            style("(reserved)").for_stderr().dim()
        )?;
    }

    Ok(())
}

fn heading(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}", style(title).for_stderr().bold().cyan())
}

fn target(compiled: &Compiled, id: InstId) -> String {
    match compiled.cfg.label_of(id) {
        Some(label) => format!("{id} ({label})"),
        None => id.to_string(),
    }
}

fn names(set: &LiveSet) -> String {
    let names: Vec<_> = set.iter().map(|name| name.as_str()).collect();
    format!("{{{}}}", names.join(", "))
}

fn interference(out: &mut impl Write, graph: &Interference) -> io::Result<()> {
    heading(out, "interference")?;
    writeln!(
        out,
        "  {} names, {} edges",
        graph.len(),
        graph.edge_count()
    )?;

    for name in graph.vertices() {
        let neighbors: Vec<_> = graph.neighbors(name.as_str()).map(|n| n.as_str()).collect();
        writeln!(out, "  {name:>8}: {}", neighbors.join(" "))?;
    }

    Ok(())
}

fn spilled(out: &mut impl Write, spills: &Spills) -> io::Result<()> {
    heading(out, "spills")?;

    if spills.is_empty() {
        return writeln!(out, "  none");
    }

    for (name, offset) in spills.iter() {
        writeln!(
            out,
            "  {name:>8} at {}",
            style(format!("SP+{offset}")).for_stderr().yellow()
        )?;
    }

    Ok(())
}

fn colors(out: &mut impl Write, coloring: &Coloring) -> io::Result<()> {
    for (name, color) in coloring.colors.iter() {
        writeln!(out, "  {name:>8} -> color {color}")?;
    }

    Ok(())
}
