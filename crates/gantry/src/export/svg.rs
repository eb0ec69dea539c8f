//! Self-contained SVG emitter.
//!
//! Each panel becomes a `<g>` holding exactly one `<rect>` and one `<text>`,
//! with child groups nested inside so the document mirrors the containment
//! tree. Relationship lines follow as straight `<path>` elements whose heads
//! reference a fixed set of markers in `<defs>`. The output embeds no
//! external fonts, images, or stylesheets.

use gantry_core::{
    draw::{EdgeStyle, TextEstimate},
    geometry::{Bounds, Point},
};
use svg::{
    Document,
    node::element::{Circle, Definitions, Group, Marker, Path, Rectangle, Text},
};

use crate::{
    DiagramKind,
    config::{AppConfig, LayoutConfig},
    error::GantryError,
    scene::{Scene, VisualEdge, VisualNode},
};

/// Font stack applied to every `<text>` element in the document.
const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Serialize the laid-out scene as a standalone SVG document.
pub(crate) fn render(
    scene: &Scene,
    kind: DiagramKind,
    config: &AppConfig,
) -> Result<String, GantryError> {
    let layout = config.layout();
    let margin = layout.margin();

    // Validate geometry up front while folding the overall content extent.
    let mut content: Option<Bounds> = None;
    for node in scene.nodes() {
        let bounds = node_bounds(node)?;
        content = Some(match content {
            Some(merged) => merged.merge(&bounds),
            None => bounds,
        });
    }
    let (width, height) = match content {
        Some(bounds) => (bounds.max_x() + margin, bounds.max_y() + margin),
        None => (margin * 2.0, margin * 2.0),
    };

    let mut doc = Document::new()
        .set("viewBox", format!("0 0 {width} {height}"))
        .set("width", width)
        .set("height", height);

    if let Some(background) = config
        .style()
        .background_color()
        .map_err(GantryError::Export)?
    {
        doc = doc.set("style", format!("background-color: {background}"));
    }

    doc = doc.add(marker_definitions()).add(title(kind, width, layout));

    for &root in scene.roots() {
        doc = doc.add(render_node(scene, root, config)?);
    }
    for edge in scene.edges() {
        if let Some(line) = render_edge(scene, edge, layout) {
            doc = doc.add(line);
        }
    }

    Ok(doc.to_string())
}

fn node_bounds(node: &VisualNode) -> Result<Bounds, GantryError> {
    node.bounds().ok_or_else(|| {
        GantryError::Export("scene has no geometry; layout must run before emission".to_string())
    })
}

/// Marker definitions for every relationship head the emitter can draw.
///
/// All four are declared up front regardless of which edges the scene
/// actually contains, so `url(#...)` references never dangle.
fn marker_definitions() -> Definitions {
    let diamond = Marker::new()
        .set("id", EdgeStyle::Composition.marker_id())
        .set("viewBox", "0 0 12 8")
        .set("refX", 11)
        .set("refY", 4)
        .set("markerWidth", 12)
        .set("markerHeight", 8)
        .set("orient", "auto")
        .add(
            Path::new()
                .set("d", "M 0 4 L 6 0 L 12 4 L 6 8 z")
                .set("fill", "black"),
        );

    let onormal = Marker::new()
        .set("id", EdgeStyle::Inheritance.marker_id())
        .set("viewBox", "0 0 10 10")
        .set("refX", 9)
        .set("refY", 5)
        .set("markerWidth", 10)
        .set("markerHeight", 10)
        .set("orient", "auto")
        .add(
            Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10 z")
                .set("fill", "white")
                .set("stroke", "black"),
        );

    let odot = Marker::new()
        .set("id", EdgeStyle::PortLink.marker_id())
        .set("viewBox", "0 0 10 10")
        .set("refX", 8)
        .set("refY", 5)
        .set("markerWidth", 10)
        .set("markerHeight", 10)
        .set("orient", "auto")
        .add(
            Circle::new()
                .set("cx", 5)
                .set("cy", 5)
                .set("r", 3)
                .set("fill", "white")
                .set("stroke", "black"),
        );

    let vee = Marker::new()
        .set("id", EdgeStyle::Transition.marker_id())
        .set("viewBox", "0 0 10 10")
        .set("refX", 9)
        .set("refY", 5)
        .set("markerWidth", 10)
        .set("markerHeight", 10)
        .set("orient", "auto")
        .add(
            Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10")
                .set("fill", "none")
                .set("stroke", "black"),
        );

    Definitions::new()
        .add(diamond)
        .add(onormal)
        .add(odot)
        .add(vee)
}

/// Document title centered in the top margin band.
fn title(kind: DiagramKind, width: f32, layout: &LayoutConfig) -> Text {
    Text::new(kind.title())
        .set("x", width / 2.0)
        .set("y", layout.margin() - 8.0)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "central")
        .set("font-family", FONT_FAMILY)
        .set("font-size", layout.font_size() + 2.0)
        .set("font-weight", "bold")
}

fn render_node(scene: &Scene, index: usize, config: &AppConfig) -> Result<Group, GantryError> {
    let node = scene.node(index);
    let bounds = node_bounds(node)?;
    let fill = config
        .style()
        .fill(node.kind())
        .map_err(GantryError::Export)?;

    let rect = Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("fill", fill.to_string())
        .set("stroke", "black")
        .set("stroke-width", 1);

    let mut group = Group::new()
        .set("class", node.kind().as_str())
        .add(rect)
        .add(node_label(node, bounds, config.layout()));

    for &child in node.children() {
        group = group.add(render_node(scene, child, config)?);
    }
    Ok(group)
}

/// Single-line label for a panel.
///
/// Containers carry their label in the header band, leaves in the middle of
/// the box, and boundary ports just below the box in a smaller face so the
/// name clears the owner's border.
fn node_label(node: &VisualNode, bounds: Bounds, layout: &LayoutConfig) -> Text {
    let text = TextEstimate::new(layout.font_size(), layout.char_width());

    let (anchor, font_size) = if node.is_boundary() {
        let smaller = text.smaller();
        let anchor = Point::new(
            bounds.center().x(),
            bounds.max_y() + smaller.line_height() / 2.0,
        );
        (anchor, smaller.font_size())
    } else if node.children().is_empty() {
        (bounds.center(), text.font_size())
    } else {
        let anchor = Point::new(
            bounds.center().x(),
            bounds.min_y() + layout.header_height() / 2.0,
        );
        (anchor, text.font_size())
    };

    Text::new(node.label())
        .set("x", anchor.x())
        .set("y", anchor.y())
        .set("text-anchor", "middle")
        .set("dominant-baseline", "central")
        .set("font-family", FONT_FAMILY)
        .set("font-size", font_size)
}

/// A relationship line with its marker head, or `None` when the edge never
/// received endpoints.
fn render_edge(scene: &Scene, edge: &VisualEdge, layout: &LayoutConfig) -> Option<Group> {
    let (start, end) = edge.endpoints()?;
    let style = edge.style();

    // Markers sit at the end of the path, so a source-anchored head means
    // drawing the line backwards.
    let (tail, head) = if style.marker_at_source() {
        (end, start)
    } else {
        (start, end)
    };

    let mut path = Path::new()
        .set(
            "d",
            format!("M {} {} L {} {}", tail.x(), tail.y(), head.x(), head.y()),
        )
        .set("fill", "none")
        .set("stroke", "black")
        .set("marker-end", format!("url(#{})", style.marker_id()));
    if style.is_dashed() {
        path = path.set("stroke-dasharray", "4 3");
    }

    let mut group = Group::new()
        .set("class", style.arrow_name())
        .add(path);

    if let Some(label) = edge.label() {
        let anchor = start.midpoint(end);
        let smaller = TextEstimate::new(layout.font_size(), layout.char_width()).smaller();
        group = group.add(
            Text::new(label)
                .set("x", anchor.x())
                .set("y", anchor.y() - 4.0)
                .set("text-anchor", "middle")
                .set("font-family", FONT_FAMILY)
                .set("font-size", smaller.font_size()),
        );
    }

    let source = scene.node(edge.source()).id();
    let target = scene.node(edge.target()).id();
    log::trace!(
        source:% = source,
        target:% = target,
        arrow = style.arrow_name();
        "Drew relationship line"
    );

    Some(group)
}
