//! Renderers for cascade stages
//!
//! `text` is meant for a terminal, `dot` for Graphviz (`neato -n` keeps the
//! pinned positions).

use crate::graph::Graph;
use crate::layout::Layout;
use crate::stage::{Stage, Tone};
use std::fmt::Write;

/// Legend shared by every renderer
pub fn legend() -> String {
    let mut out = String::from("Legend\n");
    out.push_str("  Top number:    parent sum\n");
    out.push_str("  Bottom number: node value\n");
    for tone in [Tone::Positive, Tone::Negative, Tone::Neutral] {
        let meaning = match tone {
            Tone::Positive => "positive value",
            Tone::Negative => "negative value",
            Tone::Neutral => "zero or not yet active",
        };
        let _ = writeln!(out, "  {} {:<9} {}", tone.marker(), tone.color(), meaning);
    }
    out
}

/// One line per layer: `id[marker label]`, two-line labels joined by `/`
pub fn text(stage: &Stage, graph: &Graph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Stage {}: {} ==", stage.index, stage.title);
    for (layer, ids) in graph.layers().iter().enumerate() {
        let cells: Vec<String> = ids
            .iter()
            .filter_map(|&id| stage.view(id))
            .map(|view| {
                if view.active {
                    format!("{}[{} {}]", view.id, view.tone.marker(), view.label.replace('\n', "/"))
                } else {
                    format!("{}[ ]", view.id)
                }
            })
            .collect();
        let _ = writeln!(out, "  L{}: {}", layer, cells.join("  "));
    }
    out
}

/// Graphviz digraph of one stage with pinned positions
pub fn dot(stage: &Stage, graph: &Graph, layout: &Layout) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph stage_{} {{", stage.index);
    let _ = writeln!(out, "  label=\"{}\";", stage.title);
    let _ = writeln!(out, "  labelloc=t;");
    let _ = writeln!(
        out,
        "  node [shape=circle, style=filled, color=black, fixedsize=true, width=0.8];"
    );

    for view in &stage.nodes {
        let pos = layout
            .position(view.id)
            .map(|p| format!(", pos=\"{:.2},{:.2}!\"", p.x, p.y))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  n{} [label=\"{}\", fillcolor={}{}];",
            view.id,
            view.label.replace('\n', "\\n"),
            view.tone.color(),
            pos
        );
    }
    for edge in graph.edges() {
        let _ = writeln!(out, "  n{} -> n{};", edge.source, edge.target);
    }
    out.push_str("}\n");
    out
}
