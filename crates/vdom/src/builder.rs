//! Tree construction helpers.
//!
//! `h` flattens its child arguments exactly one level: a list argument is
//! spliced into the child list, but a list inside that list is kept as a
//! [`ViewNode::Nested`] value. Nothing is validated; any tag and any prop map
//! are accepted.

use crate::node::{Element, Props, ViewNode};

/// One child argument passed to [`h`].
#[derive(Clone, Debug, PartialEq)]
pub enum Child {
    Node(ViewNode),
    List(Vec<Child>),
}

impl Child {
    fn into_value(self) -> ViewNode {
        match self {
            Child::Node(node) => node,
            Child::List(items) => {
                ViewNode::Nested(items.into_iter().map(Child::into_value).collect())
            }
        }
    }
}

impl From<ViewNode> for Child {
    fn from(node: ViewNode) -> Self {
        Child::Node(node)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Node(ViewNode::Text(text.to_string()))
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Node(ViewNode::Text(text))
    }
}

impl<T: Into<Child>> From<Vec<T>> for Child {
    fn from(items: Vec<T>) -> Self {
        Child::List(items.into_iter().map(Into::into).collect())
    }
}

/// Builds an element node. `None` props become an empty map.
pub fn h<C>(tag: impl Into<String>, props: Option<Props>, children: C) -> ViewNode
where
    C: IntoIterator,
    C::Item: Into<Child>,
{
    ViewNode::Element(Element {
        tag: tag.into(),
        props: props.unwrap_or_default(),
        children: flatten(children.into_iter().map(Into::into)),
    })
}

pub fn text(value: impl Into<String>) -> ViewNode {
    ViewNode::Text(value.into())
}

/// Splices list arguments one level deep.
pub fn flatten(args: impl IntoIterator<Item = Child>) -> Vec<ViewNode> {
    let mut out = Vec::new();
    for arg in args {
        match arg {
            Child::Node(node) => out.push(node),
            Child::List(items) => out.extend(items.into_iter().map(Child::into_value)),
        }
    }
    out
}

/// Builds a [`Props`] map from `key => value` pairs.
///
/// ```
/// let props = vdom::props! { "id" => "filmList", "tabIndex" => 2 };
/// assert_eq!(props.len(), 2);
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Props::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut props = $crate::Props::new();
        $(
            props.insert(
                ::std::string::String::from($key),
                $crate::PropValue::from($value),
            );
        )+
        props
    }};
}
