//! TOML reconciliation case corpus.
//!
//! A corpus file holds `[[case]]` tables:
//!
//! ```toml
//! [[case]]
//! name = "list grows"
//! old = { tag = "ul", props = { className = "list-0" } }
//! new = { tag = "ul", props = { className = "list-1" }, children = [{ tag = "li", children = ["item ", "0"] }] }
//! edits = ["[0] update +className=list-1", "  [0] create <li>"]
//! ```
//!
//! Trees are a string (text leaf) or a table with `tag`, optional `props`
//! and optional `children`. `edits`, when present, is the expected
//! `vdom::debug::outline_edit` rendering of `diff(new, old)`.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use vdom::{Element, PropValue, Props, ViewNode};

#[derive(Debug, Deserialize)]
struct CorpusFile {
    #[serde(default)]
    case: Vec<ReconcileCase>,
}

#[derive(Debug, Deserialize)]
pub struct ReconcileCase {
    pub name: String,
    pub old: TreeSpec,
    pub new: TreeSpec,
    #[serde(default)]
    pub edits: Option<Vec<String>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TreeSpec {
    Text(String),
    Element {
        tag: String,
        #[serde(default)]
        props: toml::Table,
        #[serde(default)]
        children: Vec<TreeSpec>,
    },
}

impl TreeSpec {
    pub fn to_view(&self) -> Result<ViewNode, String> {
        match self {
            TreeSpec::Text(text) => Ok(ViewNode::Text(text.clone())),
            TreeSpec::Element {
                tag,
                props,
                children,
            } => {
                let props = props
                    .iter()
                    .map(|(key, value)| prop_value(key, value).map(|value| (key.clone(), value)))
                    .collect::<Result<Props, String>>()?;
                let children = children
                    .iter()
                    .map(TreeSpec::to_view)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ViewNode::Element(Element {
                    tag: tag.clone(),
                    props,
                    children,
                }))
            }
        }
    }
}

fn prop_value(key: &str, value: &toml::Value) -> Result<PropValue, String> {
    match value {
        toml::Value::String(s) => Ok(PropValue::Str(s.clone())),
        toml::Value::Integer(n) => Ok(PropValue::Int(*n)),
        toml::Value::Float(x) => Ok(PropValue::Float(*x)),
        toml::Value::Boolean(b) => Ok(PropValue::Bool(*b)),
        other => Err(format!(
            "prop {key:?} has unsupported type {}",
            other.type_str()
        )),
    }
}

pub fn parse_cases(content: &str) -> Result<Vec<ReconcileCase>, String> {
    let file: CorpusFile = toml::from_str(content).map_err(|err| err.to_string())?;
    Ok(file.case)
}

pub fn load_cases(path: &Path) -> Vec<ReconcileCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read corpus {path:?}: {err}"));
    let cases =
        parse_cases(&content).unwrap_or_else(|err| panic!("failed to parse corpus {path:?}: {err}"));
    assert!(!cases.is_empty(), "corpus {path:?} has no cases");
    cases
}
