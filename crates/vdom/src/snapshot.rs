//! Line snapshots of view trees, and the equality rules tests use to compare
//! a patched host against a fresh render. Not a stable format.
//!
//! Equivalence rules:
//! - Node kinds must match.
//! - Element tags must match.
//! - Keys and values must match strictly, so `Int(1)` and `Float(1.0)`
//!   differ. Prop order only counts when `ordered_props` is set; a patched
//!   host keeps the position a prop was first set at.
//! - Text must match exactly.
//! - Falsy-valued props can be ignored by options. Patching leaves them
//!   behind when a prop is removed, so round-trip checks usually ignore them.

use crate::node::{Element, PropValue, Props, ViewNode};
use std::fmt::{self, Write};

const INDENT_WIDTH: usize = 2;
const MAX_LINE_CHARS: usize = 160;

#[derive(Clone, Copy, Debug)]
pub struct SnapshotOptions {
    pub ignore_falsy_props: bool,
    pub ordered_props: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            ignore_falsy_props: true,
            ordered_props: false,
        }
    }
}

/// One line per node, indented by depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewSnapshot {
    lines: Vec<String>,
}

impl ViewSnapshot {
    pub fn new(root: &ViewNode, options: SnapshotOptions) -> Self {
        let mut lines = Vec::new();
        push_lines(root, 0, &options, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for ViewSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn push_lines(node: &ViewNode, depth: usize, options: &SnapshotOptions, out: &mut Vec<String>) {
    let mut line = " ".repeat(depth * INDENT_WIDTH);
    write_node_line(&mut line, node, options);
    out.push(line);
    for child in node.children() {
        push_lines(child, depth + 1, options, out);
    }
}

/// First point at which two view trees disagree.
#[derive(Debug)]
pub struct ViewMismatch<'a> {
    path: String,
    detail: String,
    expected: &'a ViewNode,
    actual: &'a ViewNode,
    options: SnapshotOptions,
}

impl ViewMismatch<'_> {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for ViewMismatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "view mismatch at {}: {}", self.path, self.detail)?;
        writeln!(f, "expected: {}", clipped_line(self.expected, &self.options))?;
        writeln!(f, "actual:   {}", clipped_line(self.actual, &self.options))?;
        writeln!(f, "expected subtree:\n{}", ViewSnapshot::new(self.expected, self.options))?;
        writeln!(f, "actual subtree:\n{}", ViewSnapshot::new(self.actual, self.options))
    }
}

impl std::error::Error for ViewMismatch<'_> {}

pub fn assert_view_eq(expected: &ViewNode, actual: &ViewNode, options: SnapshotOptions) {
    if let Err(mismatch) = compare_views(expected, actual, options) {
        panic!("{mismatch}");
    }
}

pub fn compare_views<'a>(
    expected: &'a ViewNode,
    actual: &'a ViewNode,
    options: SnapshotOptions,
) -> Result<(), Box<ViewMismatch<'a>>> {
    let mut walker = CompareWalker {
        options,
        path: vec![node_label(expected)],
    };
    walker.nodes(expected, actual)
}

struct CompareWalker {
    options: SnapshotOptions,
    path: Vec<String>,
}

impl CompareWalker {
    fn fail<'a>(
        &self,
        detail: impl Into<String>,
        expected: &'a ViewNode,
        actual: &'a ViewNode,
    ) -> Box<ViewMismatch<'a>> {
        Box::new(ViewMismatch {
            path: format!("/{}", self.path.join("/")),
            detail: detail.into(),
            expected,
            actual,
            options: self.options,
        })
    }

    fn nodes<'a>(
        &mut self,
        expected: &'a ViewNode,
        actual: &'a ViewNode,
    ) -> Result<(), Box<ViewMismatch<'a>>> {
        match (expected, actual) {
            (ViewNode::Element(exp), ViewNode::Element(act)) => {
                if exp.tag != act.tag {
                    return Err(self.fail("element tag", expected, actual));
                }
                if let Err(detail) = self.props(exp, act) {
                    return Err(self.fail(detail, expected, actual));
                }
                self.children(expected, actual)
            }
            (ViewNode::Text(exp), ViewNode::Text(act)) => {
                if exp != act {
                    return Err(self.fail("text", expected, actual));
                }
                Ok(())
            }
            (ViewNode::Nested(_), ViewNode::Nested(_)) => self.children(expected, actual),
            _ => Err(self.fail("node kind", expected, actual)),
        }
    }

    fn props(&self, expected: &Element, actual: &Element) -> Result<(), String> {
        let exp = visible_props(&expected.props, &self.options);
        let act = visible_props(&actual.props, &self.options);
        if exp.len() != act.len() {
            return Err(format!(
                "prop count (expected {}, actual {})",
                exp.len(),
                act.len()
            ));
        }
        for (i, ((exp_key, exp_value), (act_key, act_value))) in exp.iter().zip(&act).enumerate() {
            if exp_key != act_key {
                return Err(format!("prop key at index {i}"));
            }
            if exp_value != act_value {
                return Err(format!("prop value of {exp_key:?}"));
            }
        }
        Ok(())
    }

    fn children<'a>(
        &mut self,
        expected: &'a ViewNode,
        actual: &'a ViewNode,
    ) -> Result<(), Box<ViewMismatch<'a>>> {
        let (exp, act) = (expected.children(), actual.children());
        if exp.len() != act.len() {
            return Err(self.fail(
                format!("child count (expected {}, actual {})", exp.len(), act.len()),
                expected,
                actual,
            ));
        }
        for (idx, (exp_child, act_child)) in exp.iter().zip(act).enumerate() {
            self.path.push(format!("{}[{idx}]", node_label(exp_child)));
            self.nodes(exp_child, act_child)?;
            self.path.pop();
        }
        Ok(())
    }
}

fn visible_props<'p>(props: &'p Props, options: &SnapshotOptions) -> Vec<(&'p str, &'p PropValue)> {
    let mut visible: Vec<_> = props
        .iter()
        .filter(|(_, value)| !options.ignore_falsy_props || value.is_truthy())
        .map(|(key, value)| (key.as_str(), value))
        .collect();
    if !options.ordered_props {
        visible.sort_by(|a, b| a.0.cmp(b.0));
    }
    visible
}

fn node_label(node: &ViewNode) -> String {
    match node {
        ViewNode::Element(element) => match element.props.get("id") {
            Some(id) if id.is_truthy() => format!("{}#{id}", element.tag),
            _ => element.tag.clone(),
        },
        ViewNode::Text(_) => "#text".to_string(),
        ViewNode::Nested(_) => "#nested".to_string(),
    }
}

fn clipped_line(node: &ViewNode, options: &SnapshotOptions) -> String {
    let mut line = String::new();
    write_node_line(&mut line, node, options);
    if let Some((cut, _)) = line.char_indices().nth(MAX_LINE_CHARS) {
        line.truncate(cut);
        line.push_str("...");
    }
    line
}

fn write_node_line(out: &mut String, node: &ViewNode, options: &SnapshotOptions) {
    match node {
        ViewNode::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (key, value) in visible_props(&element.props, options) {
                let _ = write!(out, " {key}=");
                write_prop_value(out, value);
            }
            out.push('>');
        }
        // Debug formatting quotes and escapes the text.
        ViewNode::Text(text) => {
            let _ = write!(out, "{text:?}");
        }
        ViewNode::Nested(items) => {
            let _ = write!(out, "#nested len={}", items.len());
        }
    }
}

fn write_prop_value(out: &mut String, value: &PropValue) {
    let _ = match value {
        PropValue::Str(s) => write!(out, "{s:?}"),
        PropValue::Float(x) => write!(out, "{x:?}"),
        other => write!(out, "{other}"),
    };
}

#[cfg(test)]
mod tests {
    use super::{SnapshotOptions, ViewSnapshot, assert_view_eq, compare_views};
    use crate::builder::h;
    use crate::node::{PropValue, ViewNode};
    use crate::props;

    #[test]
    fn falsy_props_are_ignored_by_default() {
        let expected = h("p", Some(props! { "title" => "t" }), ["hi"]);
        let actual = h(
            "p",
            Some(props! { "title" => "t", "id" => PropValue::Null, "hidden" => false }),
            ["hi"],
        );
        assert_view_eq(&expected, &actual, SnapshotOptions::default());
        let strict = SnapshotOptions {
            ignore_falsy_props: false,
            ..SnapshotOptions::default()
        };
        assert!(compare_views(&expected, &actual, strict).is_err());
    }

    #[test]
    fn prop_order_counts_only_when_ordered() {
        let expected = h("p", Some(props! { "id" => "a", "title" => "t" }), ["x"]);
        let actual = h("p", Some(props! { "title" => "t", "id" => "a" }), ["x"]);
        assert_view_eq(&expected, &actual, SnapshotOptions::default());
        let ordered = SnapshotOptions {
            ordered_props: true,
            ..SnapshotOptions::default()
        };
        let err = compare_views(&expected, &actual, ordered).expect_err("expected mismatch");
        assert!(err.to_string().contains("prop key at index 0"));
    }

    #[test]
    fn mismatch_points_to_text() {
        let expected = h("div", None, vec![h("p", None, ["a"])]);
        let actual = h("div", None, vec![h("p", None, ["b"])]);
        let err = compare_views(&expected, &actual, SnapshotOptions::default())
            .expect_err("expected mismatch");
        let message = err.to_string();
        assert!(message.contains("/div/p[0]/#text[0]"), "{message}");
        assert!(message.contains(": text"), "{message}");
    }

    #[test]
    fn mismatch_path_includes_id_label() {
        let expected = h("ul", Some(props! { "id" => "filmList" }), vec![h("li", None, ["a"])]);
        let actual = h("ul", Some(props! { "id" => "filmList" }), vec![h("ol", None, ["a"])]);
        let err = compare_views(&expected, &actual, SnapshotOptions::default())
            .expect_err("expected mismatch");
        assert_eq!(err.path(), "/ul#filmList/li[0]");
        assert_eq!(err.detail(), "element tag");
        assert!(err.to_string().contains("ul#filmList/li[0]"));
    }

    #[test]
    fn snapshot_lines_are_indented() {
        let node = h(
            "ul",
            Some(props! { "className" => "list-1", "tabIndex" => 2 }),
            vec![h("li", None, ["item ", "0"])],
        );
        let snapshot = ViewSnapshot::new(&node, SnapshotOptions::default());
        assert_eq!(
            snapshot.as_lines(),
            [
                "<ul className=\"list-1\" tabIndex=2>",
                "  <li>",
                "    \"item \"",
                "    \"0\"",
            ]
        );
        assert_eq!(snapshot.to_string(), snapshot.render());
        assert_eq!(
            ViewSnapshot::new(&ViewNode::from("x"), SnapshotOptions::default()).render(),
            "\"x\""
        );
    }
}
