use crate::edit::{Edit, PropEdit};
use crate::node::ViewNode;

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

fn push_preview_replace_newlines(out: &mut String, s: &str, max_chars: usize) {
    let mut truncated = false;
    for (i, ch) in s.chars().enumerate() {
        if i == max_chars {
            truncated = true;
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
    if truncated {
        out.push('…');
    }
}

fn push_node_head(line: &mut String, node: &ViewNode) {
    match node {
        ViewNode::Element(element) => {
            line.push('<');
            line.push_str(&element.tag);
            for key in ["id", "className"] {
                let value = element.prop(key);
                if value.is_truthy() {
                    line.push(' ');
                    line.push_str(key);
                    line.push_str("=\"");
                    push_preview_replace_newlines(line, &value.to_string(), PREVIEW_CHARS);
                    line.push('"');
                }
            }
            line.push('>');
        }
        ViewNode::Text(text) => {
            line.push('"');
            push_preview_replace_newlines(line, text, PREVIEW_CHARS);
            line.push('"');
        }
        ViewNode::Nested(items) => {
            line.push_str("#nested[");
            line.push_str(&items.len().to_string());
            line.push(']');
        }
    }
}

/// Indented outline of a view tree, at most `cap` lines.
pub fn outline_view(root: &ViewNode, cap: usize) -> Vec<String> {
    fn walk(node: &ViewNode, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let mut line = INDENT_STEP.repeat(depth);
        push_node_head(&mut line, node);
        out.push(line);
        for child in node.children() {
            walk(child, depth + 1, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(root, 0, &mut out, &mut left);
    out
}

/// Indented outline of an edit tree, at most `cap` lines.
///
/// Every edit is prefixed with the index it applies to. Subtrees that would
/// not touch the host are skipped.
pub fn outline_edit(root: &Edit, cap: usize) -> Vec<String> {
    fn walk(edit: &Edit, index: usize, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 || edit.is_noop_deep() {
            return;
        }
        let mut line = INDENT_STEP.repeat(depth);
        line.push_str(&format!("[{index}] "));
        match edit {
            Edit::NoOp => {}
            Edit::Create(node) => {
                line.push_str("create ");
                push_node_head(&mut line, node);
            }
            Edit::Remove => line.push_str("remove"),
            Edit::Replace(node) => {
                line.push_str("replace ");
                push_node_head(&mut line, node);
            }
            Edit::Update { props, children } => {
                line.push_str("update");
                for prop in props {
                    match prop {
                        PropEdit::SetProp { key, value } => {
                            line.push_str(&format!(" +{key}={value}"));
                        }
                        PropEdit::RemoveProp { key, .. } => {
                            line.push_str(&format!(" -{key}"));
                        }
                    }
                }
                *left -= 1;
                out.push(line);
                for (i, child) in children.iter().enumerate() {
                    walk(child, i, depth + 1, out, left);
                }
                return;
            }
        }
        *left -= 1;
        out.push(line);
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(root, 0, 0, &mut out, &mut left);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::h;
    use crate::diff::diff_trees;
    use crate::props;

    #[test]
    fn outline_view_respects_cap() {
        let node = h(
            "ul",
            Some(props! { "id" => "filmList", "className" => "list-1" }),
            vec![h("li", None, ["item ", "0"]), h("li", None, ["item ", "1"])],
        );
        let lines = outline_view(&node, 3);
        assert_eq!(
            lines,
            [
                "<ul id=\"filmList\" className=\"list-1\">",
                "  <li>",
                "    \"item \"",
            ]
        );
    }

    #[test]
    fn outline_edit_skips_noops() {
        let old = h("ul", Some(props! { "className" => "list-0" }), ["a", "b"]);
        let new = h("ul", Some(props! { "className" => "list-1" }), ["a", "c", "d"]);
        let lines = outline_edit(&diff_trees(&new, &old), 16);
        assert_eq!(
            lines,
            [
                "[0] update +className=list-1",
                "  [1] replace \"c\"",
                "  [2] create \"d\"",
            ]
        );
    }
}
