//! Visual scene synthesis from the semantic model.
//!
//! The scene is the un-laid-out visual graph: a flat arena of panels
//! ([`VisualNode`]) whose nesting mirrors element ownership, plus the edge
//! list ([`VisualEdge`]) derived from the model's relation sets. Arena order
//! is the pre-order walk of the element forest, so iterating the arena
//! reproduces source order. Synthesis computes no geometry; the two `Option`
//! fields stay empty until the layout pass fills them in place.

use std::collections::HashMap;

use log::debug;

use gantry_core::{
    draw::EdgeStyle,
    geometry::{Bounds, Point},
    identifier::Id,
    model::{Element, ElementKind, Model, Relation},
};

/// One rectangular panel in the diagram.
#[derive(Debug, Clone)]
pub struct VisualNode {
    id: Id,
    label: String,
    kind: ElementKind,
    children: Vec<usize>,
    boundary: bool,
    bounds: Option<Bounds>,
}

impl VisualNode {
    /// Stable identity derived from the element's path.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Display label, never empty.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Kind tag driving fill color and placement rules.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Arena indices of the nested panels, in source order.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// True for ports drawn straddling the owner's border.
    pub fn is_boundary(&self) -> bool {
        self.boundary
    }

    /// Computed geometry, absent until laid out.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }
}

/// One drawn relation between two panels.
#[derive(Debug, Clone)]
pub struct VisualEdge {
    source: usize,
    target: usize,
    style: EdgeStyle,
    label: Option<String>,
    endpoints: Option<(Point, Point)>,
}

impl VisualEdge {
    fn new(source: usize, target: usize, style: EdgeStyle, label: Option<String>) -> Self {
        Self {
            source,
            target,
            style,
            label,
            endpoints: None,
        }
    }

    /// Arena index of the source panel.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Arena index of the target panel.
    pub fn target(&self) -> usize {
        self.target
    }

    pub fn style(&self) -> EdgeStyle {
        self.style
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Resolved boundary points, absent until laid out.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        self.endpoints
    }

    pub(crate) fn set_endpoints(&mut self, endpoints: (Point, Point)) {
        self.endpoints = Some(endpoints);
    }
}

/// The visual graph: node arena, edge list, and root indices.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<VisualNode>,
    edges: Vec<VisualEdge>,
    roots: Vec<usize>,
}

impl Scene {
    /// Synthesize the visual graph from a semantic model.
    ///
    /// Every element becomes exactly one panel. Dangling transitions and
    /// relations whose endpoints are not part of the element forest
    /// synthesize no edge.
    pub fn from_model(model: &Model) -> Self {
        let mut scene = Self {
            nodes: Vec::with_capacity(model.element_count()),
            edges: Vec::new(),
            roots: Vec::new(),
        };

        let mut index: HashMap<Id, usize> = HashMap::new();
        for root in model.roots() {
            let node = scene.add_element(root, &mut index);
            scene.roots.push(node);
        }

        for relation in model.compositions() {
            scene.add_relation(relation, EdgeStyle::Composition, &index);
        }
        for relation in model.inheritances() {
            scene.add_relation(relation, EdgeStyle::Inheritance, &index);
        }
        for relation in model.port_links() {
            scene.add_relation(relation, EdgeStyle::PortLink, &index);
        }
        for transition in model.transitions() {
            let Some((from, to)) = transition.endpoints() else {
                debug!(
                    source = transition.source_name(),
                    target = transition.target_name();
                    "dangling transition synthesizes no edge"
                );
                continue;
            };
            if let (Some(&source), Some(&target)) = (index.get(&from), index.get(&to)) {
                scene.edges.push(VisualEdge::new(
                    source,
                    target,
                    EdgeStyle::Transition,
                    transition.guard().map(String::from),
                ));
            }
        }

        debug!(
            nodes = scene.nodes.len(),
            edges = scene.edges.len();
            "scene synthesized"
        );
        scene
    }

    fn add_element(&mut self, element: &Element, index: &mut HashMap<Id, usize>) -> usize {
        let node = self.nodes.len();
        // A port with a body renders as a regular panel; only childless
        // ports sit on the owner's border.
        let boundary = element.kind().is_boundary() && element.children().is_empty();
        self.nodes.push(VisualNode {
            id: element.id(),
            label: element.display_label(),
            kind: element.kind(),
            children: Vec::new(),
            boundary,
            bounds: None,
        });
        index.insert(element.id(), node);

        let mut children = Vec::with_capacity(element.children().len());
        for child in element.children() {
            children.push(self.add_element(child, index));
        }
        self.nodes[node].children = children;
        node
    }

    fn add_relation(&mut self, relation: &Relation, style: EdgeStyle, index: &HashMap<Id, usize>) {
        match (index.get(&relation.source()), index.get(&relation.target())) {
            (Some(&source), Some(&target)) => {
                self.edges.push(VisualEdge::new(
                    source,
                    target,
                    style,
                    relation.label().map(String::from),
                ));
            }
            _ => debug!(
                source:% = relation.source(),
                target:% = relation.target();
                "relation endpoint missing from scene, skipping edge"
            ),
        }
    }

    pub fn nodes(&self) -> &[VisualNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[VisualEdge] {
        &self.edges
    }

    /// Indices of the top-level panels, in source order.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn node(&self, index: usize) -> &VisualNode {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut VisualNode {
        &mut self.nodes[index]
    }

    pub(crate) fn edge_mut(&mut self, index: usize) -> &mut VisualEdge {
        &mut self.edges[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(source: &str) -> Scene {
        let model = gantry_parser::parse(source).expect("parse should succeed");
        Scene::from_model(&model)
    }

    #[test]
    fn test_one_panel_per_element() {
        let s = scene("package Light { part Switch { port Power; state On; state Off; } }");
        assert_eq!(s.nodes().len(), 5);
        assert_eq!(s.roots(), &[0]);
    }

    #[test]
    fn test_arena_order_is_preorder() {
        let s = scene("package P { part A { port X; } part B; }");
        let labels: Vec<&str> = s.nodes().iter().map(|n| n.label()).collect();
        assert_eq!(labels, vec!["P", "A", "X", "B"]);
        assert_eq!(s.node(0).children(), &[1, 3]);
        assert_eq!(s.node(1).children(), &[2]);
    }

    #[test]
    fn test_boundary_flag_for_childless_ports_only() {
        let s = scene("part P { port Plain; port Nested { action A; } }");
        let plain = s.nodes().iter().find(|n| n.label() == "Plain").unwrap();
        let nested = s.nodes().iter().find(|n| n.label() == "Nested").unwrap();
        assert!(plain.is_boundary());
        assert!(!nested.is_boundary());
        assert_eq!(nested.kind(), ElementKind::Port);
    }

    #[test]
    fn test_relations_become_styled_edges() {
        let s = scene(
            "item def Signal; \
             block Base { } \
             block Sensor extends Base { part m : Measurement; } \
             block Measurement { } \
             part Host { port sig : Signal; state On; state Off; transition Off -> On [ go ]; }",
        );
        let styles: Vec<EdgeStyle> = s.edges().iter().map(|e| e.style()).collect();
        assert!(styles.contains(&EdgeStyle::Inheritance));
        assert!(styles.contains(&EdgeStyle::PortLink));
        assert!(styles.contains(&EdgeStyle::Transition));
        // Typed part reference plus port nesting under Host.
        assert_eq!(
            styles
                .iter()
                .filter(|s| **s == EdgeStyle::Composition)
                .count(),
            2
        );

        let transition = s
            .edges()
            .iter()
            .find(|e| e.style() == EdgeStyle::Transition)
            .unwrap();
        assert_eq!(transition.label(), Some("go"));
    }

    #[test]
    fn test_dangling_transition_has_no_edge() {
        let s = scene("part P { state On; transition Off -> On; }");
        assert!(s.edges().is_empty());
    }

    #[test]
    fn test_geometry_absent_before_layout() {
        let s = scene("part P { port Q; }");
        assert!(s.nodes().iter().all(|n| n.bounds().is_none()));
        assert!(s.edges().iter().all(|e| e.endpoints().is_none()));
    }
}
