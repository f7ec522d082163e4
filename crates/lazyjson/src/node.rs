use crate::{buffer::Span, value::ValueKind};

/// Tag of a node in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum NodeKind {
    Object,
    Array,
    /// Object entry. The span is the key text; the only child is the value.
    Field,
    /// Field whose key text contains backslash escapes.
    EscapedField,
    /// String without escapes; the span is the logical content.
    String,
    /// String whose span still contains backslash escapes.
    EscapedString,
    Integer,
    Float,
    BooleanTrue,
    BooleanFalse,
    Null,
}

impl NodeKind {
    pub(crate) fn is_field(self) -> bool {
        matches!(self, NodeKind::Field | NodeKind::EscapedField)
    }

    pub(crate) fn is_container(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }

    pub(crate) fn is_escaped(self) -> bool {
        matches!(self, NodeKind::EscapedField | NodeKind::EscapedString)
    }

    /// Kind reported to callers. Fields report their key as a string.
    pub(crate) fn value_kind(self) -> ValueKind {
        match self {
            NodeKind::Object => ValueKind::Object,
            NodeKind::Array => ValueKind::Array,
            NodeKind::Field
            | NodeKind::EscapedField
            | NodeKind::String
            | NodeKind::EscapedString => ValueKind::String,
            NodeKind::Integer => ValueKind::Integer,
            NodeKind::Float => ValueKind::Float,
            NodeKind::BooleanTrue | NodeKind::BooleanFalse => ValueKind::Boolean,
            NodeKind::Null => ValueKind::Null,
        }
    }
}

/// Index of a node in its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// One arena record. Children form a singly linked list through `next`;
/// `last_child` makes appends O(1).
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    /// Raw text, if the kind has any. Containers, booleans and null written
    /// by mutations carry none.
    pub(crate) span: Option<Span>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, span: Option<Span>) -> Self {
        Self {
            kind,
            span,
            first_child: None,
            last_child: None,
            next: None,
        }
    }
}
