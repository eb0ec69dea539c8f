//! Elaboration phase: parse tree to semantic model.
//!
//! This pass normalizes the short-lived [`ParseNode`](crate::tree::ParseNode)
//! forest into the [`Model`] the rest of the pipeline consumes. Ownership is
//! purely nesting-derived. Name resolution is tolerant across the board:
//! transitions that name a missing sibling state stay in the model flagged as
//! dangling, typed references and supertypes that resolve nowhere are logged
//! and omitted. Nothing in this pass fails.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, info};

use gantry_core::{
    identifier::Id,
    model::{Element, ElementKind, Model, Relation, Transition},
};

use crate::tree::{Detail, NodeKind, ParseNode};

/// Map a tree node kind to its element kind.
///
/// Transition and extends nodes carry relations, not elements, and are
/// handled by the scope that owns them.
fn element_kind(kind: NodeKind) -> Option<ElementKind> {
    match kind {
        NodeKind::Package => Some(ElementKind::Package),
        NodeKind::ItemDef => Some(ElementKind::ItemDef),
        NodeKind::Part => Some(ElementKind::Part),
        NodeKind::Port => Some(ElementKind::Port),
        NodeKind::Action => Some(ElementKind::Action),
        NodeKind::StateMachine => Some(ElementKind::StateMachine),
        NodeKind::State => Some(ElementKind::State),
        NodeKind::Block => Some(ElementKind::Block),
        NodeKind::Transition | NodeKind::Extends => None,
    }
}

/// Builds a [`Model`] from a parse tree.
pub(crate) struct Builder {
    /// Document-global per-kind counters for anonymous names.
    ordinals: HashMap<ElementKind, usize>,
    /// Declared name to first definition in source order.
    definitions: IndexMap<String, (Id, ElementKind)>,
    /// Typed part references awaiting the full definition index:
    /// (owner, part name, type name).
    pending_typed_refs: Vec<(Id, String, String)>,
    /// Typed ports awaiting resolution: (port, type name).
    pending_port_links: Vec<(Id, String)>,
    /// Extends clauses awaiting resolution: (subtype, supertype name).
    pending_extends: Vec<(Id, String)>,
    compositions: Vec<Relation>,
    inheritances: Vec<Relation>,
    port_links: Vec<Relation>,
    transitions: Vec<Transition>,
}

impl Builder {
    fn new() -> Self {
        Self {
            ordinals: HashMap::new(),
            definitions: IndexMap::new(),
            pending_typed_refs: Vec::new(),
            pending_port_links: Vec::new(),
            pending_extends: Vec::new(),
            compositions: Vec::new(),
            inheritances: Vec::new(),
            port_links: Vec::new(),
            transitions: Vec::new(),
        }
    }

    fn build(mut self, forest: &[ParseNode]) -> Model {
        debug!("building semantic model");

        let mut roots = Vec::new();
        for node in forest {
            match element_kind(node.kind) {
                Some(kind) => roots.push(self.build_element(node, kind, None)),
                // A transition or extends with no enclosing scope has nothing
                // to resolve against.
                None => debug!("ignoring top-level relation statement"),
            }
        }

        self.resolve_pending();

        let model = Model::new(
            roots,
            self.compositions,
            self.inheritances,
            self.port_links,
            self.transitions,
        );
        info!(
            elements = model.element_count(),
            compositions = model.compositions().len(),
            inheritances = model.inheritances().len(),
            port_links = model.port_links().len(),
            transitions = model.transitions().len();
            "model elaboration completed"
        );
        model
    }

    fn build_element(&mut self, node: &ParseNode, kind: ElementKind, parent: Option<Id>) -> Element {
        let name = if node.is_anonymous() {
            self.synthesize_name(kind)
        } else {
            node.name.clone()
        };
        let id = match parent {
            Some(parent_id) => parent_id.create_nested(Id::new(&name)),
            None => Id::new(&name),
        };

        if !node.is_anonymous()
            && matches!(
                kind,
                ElementKind::Block | ElementKind::ItemDef | ElementKind::Part
            )
        {
            self.definitions
                .entry(name.clone())
                .or_insert((id, kind));
        }

        let declared_type = match &node.detail {
            Detail::TypedRef { type_name } => Some(type_name.clone()),
            _ => None,
        };
        if let Some(type_name) = &declared_type {
            match kind {
                ElementKind::Port => self.pending_port_links.push((id, type_name.clone())),
                // The composition points from the scope that owns the part; a
                // typed part at top level stands in for its own scope.
                ElementKind::Part => self.pending_typed_refs.push((
                    parent.unwrap_or(id),
                    name.clone(),
                    type_name.clone(),
                )),
                _ => {}
            }
        }

        if let Detail::Extends { supertype } = &node.detail {
            self.pending_extends.push((id, supertype.clone()));
        }

        let children = self.build_children(id, kind, &node.children);
        let attributes = node
            .attributes
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Element::new(id, name, kind, declared_type, attributes, children)
    }

    /// Build the element children of one scope, then resolve the relation
    /// statements declared in it against those children.
    fn build_children(
        &mut self,
        parent_id: Id,
        parent_kind: ElementKind,
        nodes: &[ParseNode],
    ) -> Vec<Element> {
        let mut children = Vec::new();
        for node in nodes {
            if let Some(kind) = element_kind(node.kind) {
                children.push(self.build_element(node, kind, Some(parent_id)));
            }
        }

        // Sibling state index, built once per scope. First declaration wins.
        let mut states: HashMap<&str, Id> = HashMap::new();
        for child in &children {
            if child.kind() == ElementKind::State {
                states.entry(child.name()).or_insert(child.id());
            }
        }

        for node in nodes {
            match &node.detail {
                Detail::Transition {
                    source,
                    target,
                    guard,
                } if node.kind == NodeKind::Transition => {
                    let endpoints = match (states.get(source.as_str()), states.get(target.as_str()))
                    {
                        (Some(&from), Some(&to)) => Some((from, to)),
                        _ => {
                            debug!(
                                source = source.as_str(),
                                target = target.as_str();
                                "transition endpoint not found among sibling states, keeping as dangling"
                            );
                            None
                        }
                    };
                    self.transitions.push(Transition::new(
                        parent_id,
                        source.clone(),
                        target.clone(),
                        guard.clone(),
                        endpoints,
                    ));
                }
                Detail::Extends { supertype } if node.kind == NodeKind::Extends => {
                    self.pending_extends.push((parent_id, supertype.clone()));
                }
                _ => {}
            }
        }

        // Ownership edges come from Part nesting only; packages and blocks
        // show containment through the panel nesting alone.
        if parent_kind == ElementKind::Part {
            for child in &children {
                if matches!(child.kind(), ElementKind::Part | ElementKind::Port) {
                    self.compositions
                        .push(Relation::new(parent_id, child.id(), None));
                }
            }
        }

        children
    }

    /// Resolve collected references now that every definition is indexed.
    fn resolve_pending(&mut self) {
        for (owner, part_name, type_name) in std::mem::take(&mut self.pending_typed_refs) {
            match self.definitions.get(&type_name) {
                Some((target, _)) => {
                    self.compositions
                        .push(Relation::new(owner, *target, Some(part_name)));
                }
                None => debug!(
                    type_name = type_name.as_str();
                    "part type does not resolve, omitting composition edge"
                ),
            }
        }

        for (subtype, supertype) in std::mem::take(&mut self.pending_extends) {
            match self.definitions.get(&supertype) {
                Some((target, _)) => {
                    self.inheritances.push(Relation::new(subtype, *target, None));
                }
                None => debug!(
                    supertype = supertype.as_str();
                    "supertype does not resolve, omitting inheritance edge"
                ),
            }
        }

        for (port, type_name) in std::mem::take(&mut self.pending_port_links) {
            match self.definitions.get(&type_name) {
                Some((target, ElementKind::ItemDef)) => {
                    self.port_links.push(Relation::new(port, *target, None));
                }
                Some(_) => debug!(
                    type_name = type_name.as_str();
                    "port type is not an item definition, omitting port link"
                ),
                None => debug!(
                    type_name = type_name.as_str();
                    "port type does not resolve, omitting port link"
                ),
            }
        }
    }

    fn synthesize_name(&mut self, kind: ElementKind) -> String {
        let ordinal = self.ordinals.entry(kind).or_insert(0);
        *ordinal += 1;
        format!("{}#{}", kind.as_str(), *ordinal)
    }
}

/// Build the semantic model from a parse tree. Never fails.
pub(crate) fn build_model(forest: &[ParseNode]) -> Model {
    Builder::new().build(forest)
}
