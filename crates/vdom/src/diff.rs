//! Positional diffing of view snapshots into edit trees.
//!
//! Contract:
//! - Pure: no host access, no side effects besides trace logging.
//! - Total over {element, text, nested, absent} on either side.
//! - Element identity is the tag alone. Same-tag elements always take the
//!   `Update` path, however different their props and children are.
//! - Children are matched by index only. Inserting at the front of a list
//!   shifts every later sibling onto the wrong counterpart and usually yields
//!   a run of `Replace` edits plus one trailing `Create`. Callers that need
//!   stable identity across reorders cannot get it here.
//! - Falsy prop values read as "not set": whenever the new value is falsy
//!   the key yields a `RemoveProp` + `SetProp` pair, never a plain
//!   `SetProp`, so a move between two falsy values only shows up as that
//!   pair.
//!
//! Complexity: O(n) in the size of the larger tree.

use crate::edit::{Edit, PropEdit};
use crate::node::{ABSENT, Element, ViewNode};

/// Diffs `new` against `old`.
///
/// `None` stands for "no node at this position". Both sides absent yields
/// `NoOp`.
pub fn diff(new: Option<&ViewNode>, old: Option<&ViewNode>) -> Edit {
    let (new, old) = match (new, old) {
        (None, None) => return Edit::NoOp,
        (Some(new), None) => return Edit::Create(new.clone()),
        (None, Some(_)) => return Edit::Remove,
        (Some(new), Some(old)) => (new, old),
    };

    if changed(new, old) {
        log::trace!(target: "vdom.diff", "replace {:?} -> {:?}", old.kind(), new.kind());
        return Edit::Replace(new.clone());
    }

    match (new, old) {
        (ViewNode::Element(new), ViewNode::Element(old)) => Edit::Update {
            props: diff_props(new, old),
            children: diff_children(new, old),
        },
        _ => Edit::NoOp,
    }
}

/// Diffs two complete snapshots.
pub fn diff_trees(new: &ViewNode, old: &ViewNode) -> Edit {
    let edit = diff(Some(new), Some(old));
    log::debug!(target: "vdom.diff", "diff done: {:?}", edit.summary());
    edit
}

/// Whether `a` and `b` are different nodes rather than two versions of one.
pub fn changed(a: &ViewNode, b: &ViewNode) -> bool {
    match (a, b) {
        (ViewNode::Text(a), ViewNode::Text(b)) => a != b,
        (ViewNode::Element(a), ViewNode::Element(b)) => a.tag != b.tag,
        (ViewNode::Nested(_), ViewNode::Nested(_)) => false,
        _ => true,
    }
}

/// Prop edits turning `old`'s props into `new`'s.
///
/// Keys are visited in `new`'s insertion order, then `old`'s keys that `new`
/// lacks.
pub fn diff_props(new: &Element, old: &Element) -> Vec<PropEdit> {
    let keys = new
        .props
        .keys()
        .chain(old.props.keys().filter(|key| !new.props.contains_key(*key)));

    let mut edits = Vec::new();
    for key in keys {
        let new_val = new.props.get(key).unwrap_or(&ABSENT);
        let old_val = old.props.get(key).unwrap_or(&ABSENT);
        if !new_val.is_truthy() {
            edits.push(PropEdit::RemoveProp {
                key: key.clone(),
                value: old_val.clone(),
            });
        }
        if !old_val.is_truthy() || new_val != old_val {
            edits.push(PropEdit::SetProp {
                key: key.clone(),
                value: new_val.clone(),
            });
        }
    }
    edits
}

/// One edit per index in `0..max(|new|, |old|)`.
pub fn diff_children(new: &Element, old: &Element) -> Vec<Edit> {
    let max_len = new.children.len().max(old.children.len());
    (0..max_len)
        .map(|i| diff(new.children.get(i), old.children.get(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{Child, h};
    use crate::edit::EditKind;
    use crate::node::PropValue;
    use crate::props;

    fn list(count: usize, class: &str) -> ViewNode {
        let items: Vec<ViewNode> = (0..count)
            .map(|n| h("li", None, vec!["item ".to_string(), n.to_string()]))
            .collect();
        h("ul", Some(props! { "className" => class }), vec![items])
    }

    #[test]
    fn create_from_absence() {
        let node = list(2, "a");
        assert_eq!(diff(Some(&node), None), Edit::Create(node.clone()));
    }

    #[test]
    fn remove_to_absence() {
        let node = list(2, "a");
        assert_eq!(diff(None, Some(&node)), Edit::Remove);
        assert_eq!(diff(None, None), Edit::NoOp);
    }

    #[test]
    fn tag_change_forces_replace() {
        let a = h("a", Some(props! { "href" => "/" }), ["x"]);
        let b = h("b", Some(props! { "href" => "/" }), ["x"]);
        assert_eq!(diff(Some(&b), Some(&a)), Edit::Replace(b.clone()));
    }

    #[test]
    fn kind_change_forces_replace() {
        let element = h("span", None, ["x"]);
        let text = ViewNode::from("x");
        assert_eq!(diff(Some(&text), Some(&element)), Edit::Replace(text.clone()));
        assert_eq!(
            diff(Some(&element), Some(&text)),
            Edit::Replace(element.clone())
        );
        let nested = ViewNode::Nested(vec![ViewNode::from("x")]);
        assert_eq!(diff(Some(&nested), Some(&text)), Edit::Replace(nested.clone()));
    }

    #[test]
    fn same_text_is_noop() {
        let x = ViewNode::from("x");
        assert_eq!(diff(Some(&x), Some(&x.clone())), Edit::NoOp);
    }

    #[test]
    fn different_text_replaces_with_new() {
        let x = ViewNode::from("x");
        let y = ViewNode::from("y");
        assert_eq!(diff(Some(&x), Some(&y)), Edit::Replace(x.clone()));
    }

    #[test]
    fn nested_values_never_change() {
        let a = ViewNode::Nested(vec![ViewNode::from("a")]);
        let b = ViewNode::Nested(vec![ViewNode::from("b"), ViewNode::from("c")]);
        assert_eq!(diff(Some(&a), Some(&b)), Edit::NoOp);
    }

    #[test]
    fn identical_tree_is_noop_deep() {
        let tree = h(
            "div",
            Some(props! { "id" => "root", "tabIndex" => 3 }),
            vec![Child::from(list(4, "x")), Child::from("tail")],
        );
        let edit = diff_trees(&tree, &tree.clone());
        assert!(edit.is_noop_deep(), "{edit:?}");
        assert!(edit.summary().is_empty());
    }

    #[test]
    fn same_tag_updates_even_when_everything_differs() {
        let old = h("div", Some(props! { "id" => "a" }), ["x", "y"]);
        let new = h("div", Some(props! { "title" => "b" }), vec![h("p", None, ["z"])]);
        let Edit::Update { props, children } = diff(Some(&new), Some(&old)) else {
            panic!("expected update");
        };
        assert_eq!(
            props,
            vec![
                PropEdit::SetProp {
                    key: "title".to_string(),
                    value: PropValue::from("b"),
                },
                PropEdit::RemoveProp {
                    key: "id".to_string(),
                    value: PropValue::from("a"),
                },
                PropEdit::SetProp {
                    key: "id".to_string(),
                    value: PropValue::Null,
                },
            ]
        );
        assert_eq!(
            children,
            vec![Edit::Replace(h("p", None, ["z"])), Edit::Remove]
        );
    }

    #[test]
    fn falsy_present_value_emits_remove_then_set() {
        let old = h("input", Some(props! { "value" => "" }), Vec::<Child>::new());
        let new = old.clone();
        let (ViewNode::Element(new), ViewNode::Element(old)) = (&new, &old) else {
            unreachable!();
        };
        assert_eq!(
            diff_props(new, old),
            vec![
                PropEdit::RemoveProp {
                    key: "value".to_string(),
                    value: PropValue::from(""),
                },
                PropEdit::SetProp {
                    key: "value".to_string(),
                    value: PropValue::from(""),
                },
            ]
        );
    }

    #[test]
    fn falsy_to_falsy_change_is_not_a_plain_set() {
        let old = h("input", Some(props! { "value" => 0 }), Vec::<Child>::new());
        let new = h("input", Some(props! { "value" => false }), Vec::<Child>::new());
        let (ViewNode::Element(new), ViewNode::Element(old)) = (&new, &old) else {
            unreachable!();
        };
        let edits = diff_props(new, old);
        assert_eq!(edits.len(), 2);
        assert!(matches!(edits[0], PropEdit::RemoveProp { .. }));
        assert_eq!(
            edits[1],
            PropEdit::SetProp {
                key: "value".to_string(),
                value: PropValue::Bool(false),
            }
        );
    }

    #[test]
    fn unchanged_truthy_prop_emits_nothing() {
        let old = h("a", Some(props! { "href" => "/x", "id" => "a" }), Vec::<Child>::new());
        let new = h("a", Some(props! { "href" => "/x", "id" => "b" }), Vec::<Child>::new());
        let (ViewNode::Element(new), ViewNode::Element(old)) = (&new, &old) else {
            unreachable!();
        };
        assert_eq!(
            diff_props(new, old),
            vec![PropEdit::SetProp {
                key: "id".to_string(),
                value: PropValue::from("b"),
            }]
        );
    }

    #[test]
    fn longer_new_list_creates_trailing_children() {
        let old = list(2, "a");
        let new = list(5, "a");
        let (ViewNode::Element(new_el), ViewNode::Element(old_el)) = (&new, &old) else {
            unreachable!();
        };
        let edits = diff_children(new_el, old_el);
        assert_eq!(edits.len(), 5);
        for (i, edit) in edits.iter().enumerate() {
            if i < 2 {
                assert!(edit.is_noop_deep(), "index {i}: {edit:?}");
            } else {
                assert_eq!(edit, &Edit::Create(new_el.children[i].clone()));
            }
        }
    }

    #[test]
    fn shorter_new_list_removes_trailing_children() {
        let old = list(4, "a");
        let new = list(1, "a");
        let (ViewNode::Element(new_el), ViewNode::Element(old_el)) = (&new, &old) else {
            unreachable!();
        };
        let kinds: Vec<_> = diff_children(new_el, old_el)
            .iter()
            .map(Edit::kind)
            .collect();
        assert_eq!(
            kinds,
            [
                EditKind::Update,
                EditKind::Remove,
                EditKind::Remove,
                EditKind::Remove
            ]
        );
    }

    #[test]
    fn front_insert_cascades_into_replaces() {
        let old = h("ol", None, ["b", "c"]);
        let new = h("ol", None, ["a", "b", "c"]);
        let Edit::Update { children, .. } = diff(Some(&new), Some(&old)) else {
            panic!("expected update");
        };
        assert_eq!(
            children,
            vec![
                Edit::Replace(ViewNode::from("a")),
                Edit::Replace(ViewNode::from("b")),
                Edit::Create(ViewNode::from("c")),
            ]
        );
    }

    #[test]
    fn list_growth_scenario() {
        let old = h("ul", Some(props! { "className" => "list-0" }), Vec::<Child>::new());
        let li = h("li", None, ["item ", "0"]);
        let new = h(
            "ul",
            Some(props! { "className" => "list-1" }),
            vec![li.clone()],
        );
        assert_eq!(
            diff_trees(&new, &old),
            Edit::Update {
                props: vec![PropEdit::SetProp {
                    key: "className".to_string(),
                    value: PropValue::from("list-1"),
                }],
                children: vec![Edit::Create(li)],
            }
        );
    }
}
