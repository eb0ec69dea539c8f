//! Semantic model produced by elaboration.
//!
//! The model is the bridge between the parse tree and the visual scene: an
//! ownership forest of [`Element`]s plus the relation sets that become
//! diagram edges. It is built once, never mutated afterwards, and carries no
//! geometry.

use std::fmt;

use crate::identifier::Id;

/// Kind tag of a model element.
///
/// The tag drives the fill color, the DOT `kind` attribute and whether the
/// element sits inside its owner or on its owner's boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Package,
    ItemDef,
    Part,
    Port,
    Action,
    StateMachine,
    State,
    Block,
}

impl ElementKind {
    /// Stable lowercase tag, also used to synthesize anonymous labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Package => "package",
            ElementKind::ItemDef => "item",
            ElementKind::Part => "part",
            ElementKind::Port => "port",
            ElementKind::Action => "action",
            ElementKind::StateMachine => "state_machine",
            ElementKind::State => "state",
            ElementKind::Block => "block",
        }
    }

    /// True for elements drawn as small boxes on the owner's border.
    pub fn is_boundary(self) -> bool {
        matches!(self, ElementKind::Port)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the ownership forest.
///
/// `name` is never empty: anonymous declarations receive a synthesized
/// `kind#ordinal` name during elaboration. `id` is the `::`-joined path from
/// the root, which keeps identities unique across the document.
#[derive(Debug, Clone)]
pub struct Element {
    id: Id,
    name: String,
    kind: ElementKind,
    declared_type: Option<String>,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(
        id: Id,
        name: String,
        kind: ElementKind,
        declared_type: Option<String>,
        attributes: Vec<(String, String)>,
        children: Vec<Element>,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            declared_type,
            attributes,
            children,
        }
    }

    /// Get the element's path identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the element's declared (or synthesized) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the element's kind tag.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// The `: Type` annotation, when the declaration carried one.
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    /// Key/value attributes in source order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Owned children in source order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Returns the display text for this element.
    ///
    /// Typed declarations render as `name : Type`, everything else as the
    /// plain name.
    pub fn display_label(&self) -> String {
        match &self.declared_type {
            Some(type_name) => format!("{} : {}", self.name, type_name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A resolved structural relation between two elements.
///
/// Used for compositions (owner to owned, or owner to referenced type,
/// labeled with the part name), inheritances (subtype to supertype) and
/// port links (port to item definition).
#[derive(Debug, Clone)]
pub struct Relation {
    source: Id,
    target: Id,
    label: Option<String>,
}

impl Relation {
    pub fn new(source: Id, target: Id, label: Option<String>) -> Self {
        Self {
            source,
            target,
            label,
        }
    }

    /// Get the source element Id of this relation.
    pub fn source(&self) -> Id {
        self.source
    }

    /// Get the target element Id of this relation.
    pub fn target(&self) -> Id {
        self.target
    }

    /// Optional edge label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// A state transition, kept even when its endpoints never resolved.
///
/// Dangling transitions stay in the model so downstream consumers can see
/// them, but only resolved ones produce edges.
#[derive(Debug, Clone)]
pub struct Transition {
    owner: Id,
    source_name: String,
    target_name: String,
    guard: Option<String>,
    endpoints: Option<(Id, Id)>,
}

impl Transition {
    pub fn new(
        owner: Id,
        source_name: String,
        target_name: String,
        guard: Option<String>,
        endpoints: Option<(Id, Id)>,
    ) -> Self {
        Self {
            owner,
            source_name,
            target_name,
            guard,
            endpoints,
        }
    }

    /// The element whose scope the transition was declared in.
    pub fn owner(&self) -> Id {
        self.owner
    }

    /// Source state name as written.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Target state name as written.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Guard text from the `[ ... ]` clause, when present.
    pub fn guard(&self) -> Option<&str> {
        self.guard.as_deref()
    }

    /// Resolved source/target ids, `None` while dangling.
    pub fn endpoints(&self) -> Option<(Id, Id)> {
        self.endpoints
    }

    /// True when both endpoints resolved to sibling states.
    pub fn is_resolved(&self) -> bool {
        self.endpoints.is_some()
    }
}

/// The complete semantic model of one source document.
#[derive(Debug, Clone, Default)]
pub struct Model {
    roots: Vec<Element>,
    compositions: Vec<Relation>,
    inheritances: Vec<Relation>,
    port_links: Vec<Relation>,
    transitions: Vec<Transition>,
}

impl Model {
    pub fn new(
        roots: Vec<Element>,
        compositions: Vec<Relation>,
        inheritances: Vec<Relation>,
        port_links: Vec<Relation>,
        transitions: Vec<Transition>,
    ) -> Self {
        Self {
            roots,
            compositions,
            inheritances,
            port_links,
            transitions,
        }
    }

    /// Top-level elements in source order.
    pub fn roots(&self) -> &[Element] {
        &self.roots
    }

    /// Owner-to-owned and owner-to-referenced-type relations.
    pub fn compositions(&self) -> &[Relation] {
        &self.compositions
    }

    /// Subtype-to-supertype relations.
    pub fn inheritances(&self) -> &[Relation] {
        &self.inheritances
    }

    /// Port-to-item-definition references.
    pub fn port_links(&self) -> &[Relation] {
        &self.port_links
    }

    /// All declared transitions, resolved or dangling.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// True when the document yielded at least one drawable element.
    pub fn has_definitions(&self) -> bool {
        !self.roots.is_empty()
    }

    /// Total number of elements across the forest.
    pub fn element_count(&self) -> usize {
        fn count(element: &Element) -> usize {
            1 + element.children().iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }
}
