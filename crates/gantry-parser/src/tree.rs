//! Parse tree produced by the parser.
//!
//! The tree mirrors the textual brace nesting of the source. It is a
//! short-lived structure: the elaboration pass consumes it to build the
//! semantic model and it is discarded afterwards.

use indexmap::IndexMap;

use crate::span::Span;

/// The construct a [`ParseNode`] represents.
///
/// `StateMachine` and `State` both come from the `state` keyword: a brace
/// body makes a state machine, a bare `state X;` makes a state leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Package,
    ItemDef,
    Part,
    Port,
    Action,
    StateMachine,
    State,
    Transition,
    Block,
    Extends,
}

/// Extra per-kind payload alongside the common node fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Detail {
    #[default]
    None,
    /// `part x : Type;` or `port p : Type;`
    TypedRef { type_name: String },
    /// `extends Supertype` on a block header or as a body statement.
    Extends { supertype: String },
    /// `transition A -> B [ guard ];`
    Transition {
        source: String,
        target: String,
        guard: Option<String>,
    },
}

/// One node of the parse tree.
///
/// `name` may be empty for anonymous constructs (`part { ... }`); the
/// elaboration pass synthesizes display names for those. `attributes`
/// preserves insertion order so rendering stays stable.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    pub kind: NodeKind,
    pub name: String,
    pub children: Vec<ParseNode>,
    pub attributes: IndexMap<String, String>,
    pub span: Span,
    pub detail: Detail,
}

impl ParseNode {
    pub fn new(kind: NodeKind, name: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            name: name.into(),
            children: Vec::new(),
            attributes: IndexMap::new(),
            span,
            detail: Detail::None,
        }
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_defaults() {
        let node = ParseNode::new(NodeKind::Part, "Switch", Span::new(0..4));
        assert_eq!(node.kind, NodeKind::Part);
        assert_eq!(node.name, "Switch");
        assert!(node.children.is_empty());
        assert!(node.attributes.is_empty());
        assert_eq!(node.detail, Detail::None);
        assert!(!node.is_anonymous());
    }

    #[test]
    fn test_anonymous_node() {
        let node = ParseNode::new(NodeKind::Action, "", Span::default());
        assert!(node.is_anonymous());
    }

    #[test]
    fn test_with_detail() {
        let node = ParseNode::new(NodeKind::Extends, "", Span::default()).with_detail(
            Detail::Extends {
                supertype: "Base".to_string(),
            },
        );
        match node.detail {
            Detail::Extends { supertype } => assert_eq!(supertype, "Base"),
            other => panic!("unexpected detail: {other:?}"),
        }
    }
}
