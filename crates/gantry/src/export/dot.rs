//! Graphviz DOT emitter.
//!
//! Nodes are printed one statement per panel in pre-order, identified by
//! their quoted path so the text stays readable next to the source model.
//! The computed geometry rides along as plain attributes; Graphviz ignores
//! the extras and recomputes its own layout when the text is rendered.

use gantry_core::draw::EdgeStyle;

use crate::{
    DiagramKind,
    config::StyleConfig,
    error::GantryError,
    scene::{Scene, VisualEdge},
};

/// Serialize the laid-out scene as DOT text.
pub(crate) fn render(
    scene: &Scene,
    kind: DiagramKind,
    style: &StyleConfig,
) -> Result<String, GantryError> {
    let mut out = String::new();
    out.push_str("digraph SysML {\n");
    out.push_str("    graph [rankdir=LR];\n");
    out.push_str("    node [shape=box, style=filled, fillcolor=\"lightgray\"];\n");
    out.push_str(&format!(
        "    labelloc=\"t\"; label=\"{}\";\n",
        escape(kind.title())
    ));

    for &root in scene.roots() {
        write_node(&mut out, scene, root, style)?;
    }

    if !scene.edges().is_empty() {
        out.push('\n');
    }
    for edge in scene.edges() {
        write_edge(&mut out, scene, edge);
    }

    out.push_str("}\n");
    Ok(out)
}

fn write_node(
    out: &mut String,
    scene: &Scene,
    index: usize,
    style: &StyleConfig,
) -> Result<(), GantryError> {
    let node = scene.node(index);
    let bounds = node.bounds().ok_or_else(|| {
        GantryError::Export("scene has no geometry; layout must run before emission".to_string())
    })?;
    let fill = style.fill(node.kind()).map_err(GantryError::Export)?;

    out.push_str(&format!(
        "    \"{}\" [label=\"{}\", kind=\"{}\", fillcolor=\"{}\", pos=\"{},{}\", width={}, height={}];\n",
        escape(&node.id().to_string()),
        escape(node.label()),
        node.kind().as_str(),
        fill,
        bounds.min_x(),
        bounds.min_y(),
        bounds.width(),
        bounds.height(),
    ));

    for &child in node.children() {
        write_node(out, scene, child, style)?;
    }
    Ok(())
}

fn write_edge(out: &mut String, scene: &Scene, edge: &VisualEdge) {
    let source = scene.node(edge.source()).id().to_string();
    let target = scene.node(edge.target()).id().to_string();

    // Composition keeps its owner -> owned direction in the text; dir=back
    // places the diamond at the owner end.
    let mut attrs = match edge.style() {
        EdgeStyle::Composition => "dir=\"back\", arrowtail=\"diamond\"".to_string(),
        EdgeStyle::Inheritance => "arrowhead=\"onormal\", label=\"extends\"".to_string(),
        EdgeStyle::PortLink => "arrowhead=\"odot\", style=\"dashed\"".to_string(),
        EdgeStyle::Transition => "arrowhead=\"vee\"".to_string(),
    };
    if let Some(label) = edge.label() {
        attrs.push_str(&format!(", label=\"{}\"", escape(label)));
    }

    out.push_str(&format!(
        "    \"{}\" -> \"{}\" [{}];\n",
        escape(&source),
        escape(&target),
        attrs
    ));
}

/// Escape a string for use inside a double-quoted DOT attribute.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
