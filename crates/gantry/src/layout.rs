//! Deterministic single-pass layout.
//!
//! Geometry is attached to the scene in three phases: a post-order sizing
//! walk (leaves first), a top-down position walk, and a final edge-endpoint
//! resolution. Nothing iterates to a fixed point and nothing consults an
//! external layout tool, so the same scene and configuration always produce
//! byte-identical geometry.
//!
//! Containers stack their interior children vertically beneath a header
//! band reserved for the container's own label. Boundary ports are laid out
//! left-to-right straddling the owner's bottom border, label beneath the
//! box; the strip they occupy below the border is added to the owner's
//! effective height so stacked siblings cannot collide.

use log::{debug, info};

use gantry_core::{
    draw::{TextEstimate, boundary_point},
    geometry::{Bounds, Point, Size},
};

use crate::{config::LayoutConfig, scene::Scene};

/// Attach geometry to every node and resolve every edge endpoint.
pub(crate) fn layout(scene: &mut Scene, config: &LayoutConfig) {
    let engine = Engine::new(config);
    engine.run(scene);
    info!(
        nodes = scene.nodes().len(),
        edges = scene.edges().len();
        "layout complete"
    );
}

struct Engine<'a> {
    config: &'a LayoutConfig,
    text: TextEstimate,
}

impl<'a> Engine<'a> {
    fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            text: TextEstimate::new(config.font_size(), config.char_width()),
        }
    }

    fn run(&self, scene: &mut Scene) {
        let mut sizes = vec![Size::new(0.0, 0.0); scene.nodes().len()];
        let roots: Vec<usize> = scene.roots().to_vec();

        for &root in &roots {
            self.measure(scene, root, &mut sizes);
        }

        let margin = self.config.margin();
        let mut cursor = Point::new(margin, margin);
        for &root in &roots {
            self.place(scene, root, cursor, &sizes);
            let advance =
                sizes[root].height() + self.strip_depth(scene, root) + self.config.spacing();
            cursor = Point::new(margin, cursor.y() + advance);
        }

        self.resolve_edges(scene);
    }

    /// Post-order sizing. Fills `sizes[index]` with the panel rectangle of
    /// every node in the subtree and returns the root's size.
    fn measure(&self, scene: &Scene, index: usize, sizes: &mut [Size]) -> Size {
        let children: Vec<usize> = scene.node(index).children().to_vec();
        for &child in &children {
            self.measure(scene, child, sizes);
        }

        let node = scene.node(index);
        if node.is_boundary() {
            let size = Size::new(self.config.port_width(), self.config.port_height());
            sizes[index] = size;
            return size;
        }

        let label = self.text.measure_line(node.label());
        let padding = self.config.padding();
        let spacing = self.config.spacing();

        let size = if children.is_empty() {
            Size::new(
                label.width() + 2.0 * padding,
                label.height() + 2.0 * padding,
            )
        } else {
            let mut body_width: f32 = 0.0;
            let mut body_height: f32 = 0.0;
            let mut interior = 0usize;
            let mut strip_width: f32 = 0.0;
            let mut ports = 0usize;

            for &child in &children {
                if scene.node(child).is_boundary() {
                    if ports > 0 {
                        strip_width += spacing;
                    }
                    strip_width += self.port_cell_width(scene.node(child).label());
                    ports += 1;
                } else {
                    if interior > 0 {
                        body_height += spacing;
                    }
                    body_width = body_width.max(sizes[child].width());
                    body_height += sizes[child].height() + self.strip_depth(scene, child);
                    interior += 1;
                }
            }

            let width = label.width().max(body_width).max(strip_width) + 2.0 * padding;
            let height = self.config.header_height() + body_height + padding;
            Size::new(width, height)
        };

        sizes[index] = size;
        size
    }

    /// Top-down absolute positioning from the measured sizes.
    fn place(&self, scene: &mut Scene, index: usize, origin: Point, sizes: &[Size]) {
        let size = sizes[index];
        scene
            .node_mut(index)
            .set_bounds(Bounds::new_from_top_left(origin, size));

        let children: Vec<usize> = scene.node(index).children().to_vec();
        let padding = self.config.padding();
        let spacing = self.config.spacing();

        let mut offset = Point::new(
            origin.x() + padding,
            origin.y() + self.config.header_height(),
        );
        let border = origin.y() + size.height();
        let mut cell_x = origin.x() + padding;

        for &child in &children {
            if scene.node(child).is_boundary() {
                let cell_width = self.port_cell_width(scene.node(child).label());
                let box_origin = Point::new(
                    cell_x + (cell_width - self.config.port_width()) / 2.0,
                    border - self.config.port_height() / 2.0,
                );
                scene.node_mut(child).set_bounds(Bounds::new_from_top_left(
                    box_origin,
                    Size::new(self.config.port_width(), self.config.port_height()),
                ));
                cell_x += cell_width + spacing;
            } else {
                self.place(scene, child, offset, sizes);
                let advance = sizes[child].height() + self.strip_depth(scene, child) + spacing;
                offset = Point::new(offset.x(), offset.y() + advance);
            }
        }
    }

    /// Height of the strip a node's boundary ports occupy below its border.
    fn strip_depth(&self, scene: &Scene, index: usize) -> f32 {
        let has_ports = scene
            .node(index)
            .children()
            .iter()
            .any(|&child| scene.node(child).is_boundary());
        if has_ports {
            self.config.port_height() / 2.0 + self.text.smaller().line_height()
        } else {
            0.0
        }
    }

    /// Horizontal room one port needs: the box or its label, whichever is wider.
    fn port_cell_width(&self, label: &str) -> f32 {
        self.config
            .port_width()
            .max(self.text.smaller().measure_line(label).width())
    }

    /// Connect each edge to the boundary points of its endpoints facing the
    /// other node's center.
    fn resolve_edges(&self, scene: &mut Scene) {
        for index in 0..scene.edges().len() {
            let (source, target) = {
                let edge = &scene.edges()[index];
                (edge.source(), edge.target())
            };
            let (Some(source_bounds), Some(target_bounds)) =
                (scene.node(source).bounds(), scene.node(target).bounds())
            else {
                debug!(edge = index; "edge endpoint has no geometry, leaving unresolved");
                continue;
            };

            let start = boundary_point(source_bounds, target_bounds.center());
            let end = boundary_point(target_bounds, source_bounds.center());
            scene.edge_mut(index).set_endpoints((start, end));
        }
    }
}
