//! View tree snapshots.
//!
//! A snapshot is an immutable tree of [`ViewNode`] values built fresh for every
//! reconciliation pass and dropped once it has been diffed.
//!
//! Invariants:
//! - Child order is the only identity signal; there are no keys.
//! - Props keep insertion order. The diff walks them in that order.
//! - A falsy [`PropValue`] means "not set" to the diff (see [`PropValue::is_truthy`]).

use indexmap::IndexMap;
use std::fmt;

/// Insertion-ordered prop map of an element.
pub type Props = IndexMap<String, PropValue>;

/// Value sentinel used when a prop key is absent from a map.
pub const ABSENT: PropValue = PropValue::Null;

/// A prop value.
///
/// Equality is strict: values of different variants never compare equal and
/// `Float(NaN)` is unequal to itself.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl PropValue {
    /// `false` for `""`, `0`, `0.0`, `NaN`, `false` and `Null`.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropValue::Str(s) => !s.is_empty(),
            PropValue::Int(n) => *n != 0,
            PropValue::Float(f) => *f != 0.0 && !f.is_nan(),
            PropValue::Bool(b) => *b,
            PropValue::Null => false,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Str(s) => f.write_str(s),
            PropValue::Int(n) => write!(f, "{n}"),
            PropValue::Float(x) => write!(f, "{x}"),
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Int(i64::from(value))
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: String,
    pub props: Props,
    pub children: Vec<ViewNode>,
}

impl Element {
    /// Looks up a prop, yielding [`ABSENT`] for missing keys.
    pub fn prop(&self, key: &str) -> &PropValue {
        self.props.get(key).unwrap_or(&ABSENT)
    }
}

/// One node of a view snapshot.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewNode {
    Element(Element),
    Text(String),
    /// A child sequence the builder left unflattened (nested two or more
    /// levels deep). It is neither an element nor text; hosts refuse to
    /// instantiate it.
    Nested(Vec<ViewNode>),
}

/// Runtime shape of a [`ViewNode`], used for the "changed" check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Element,
    Text,
    Nested,
}

impl ViewNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            ViewNode::Element(_) => NodeKind::Element,
            ViewNode::Text(_) => NodeKind::Text,
            ViewNode::Nested(_) => NodeKind::Nested,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ViewNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ViewNode::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn children(&self) -> &[ViewNode] {
        match self {
            ViewNode::Element(element) => &element.children,
            ViewNode::Nested(items) => items,
            ViewNode::Text(_) => &[],
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(ViewNode::node_count).sum::<usize>()
    }
}

impl From<Element> for ViewNode {
    fn from(element: Element) -> Self {
        ViewNode::Element(element)
    }
}

impl From<&str> for ViewNode {
    fn from(text: &str) -> Self {
        ViewNode::Text(text.to_string())
    }
}

impl From<String> for ViewNode {
    fn from(text: String) -> Self {
        ViewNode::Text(text)
    }
}
