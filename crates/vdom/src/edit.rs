//! Edit tree produced by the diff and consumed by the patcher.
//!
//! Invariants:
//! - An `Edit` addresses a position, not a node: the patcher resolves it
//!   against the host parent's child at the index it was produced for.
//! - `Update::children` is index-aligned with both original child lists and
//!   has length `max(|new|, |old|)`.
//! - `Update::props` is applied in order. A key may carry a `RemoveProp`
//!   followed by a `SetProp`.
//! - Edits are consumed once; the patcher takes them by value.

use crate::node::{PropValue, ViewNode};

/// Prop-level edit on a surviving element.
#[derive(Clone, Debug, PartialEq)]
pub enum PropEdit {
    SetProp { key: String, value: PropValue },
    RemoveProp { key: String, value: PropValue },
}

impl PropEdit {
    pub fn key(&self) -> &str {
        match self {
            PropEdit::SetProp { key, .. } | PropEdit::RemoveProp { key, .. } => key,
        }
    }
}

/// Structural edit for one position of the host tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Edit {
    /// Nothing to do at this position.
    #[default]
    NoOp,
    /// Materialise the subtree and append it to the parent.
    Create(ViewNode),
    /// Delete the host node at this position.
    Remove,
    /// Replace the host node at this position wholesale.
    Replace(ViewNode),
    /// The host node survives; patch its props, then its children.
    Update {
        props: Vec<PropEdit>,
        children: Vec<Edit>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditKind {
    NoOp,
    Create,
    Remove,
    Replace,
    Update,
}

/// Counts of every edit in a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditSummary {
    pub noops: usize,
    pub creates: usize,
    pub removes: usize,
    pub replaces: usize,
    pub updates: usize,
    pub set_props: usize,
    pub remove_props: usize,
}

impl EditSummary {
    /// True when applying the tree would not touch the host.
    pub fn is_empty(&self) -> bool {
        self.creates == 0
            && self.removes == 0
            && self.replaces == 0
            && self.set_props == 0
            && self.remove_props == 0
    }
}

impl Edit {
    pub fn kind(&self) -> EditKind {
        match self {
            Edit::NoOp => EditKind::NoOp,
            Edit::Create(_) => EditKind::Create,
            Edit::Remove => EditKind::Remove,
            Edit::Replace(_) => EditKind::Replace,
            Edit::Update { .. } => EditKind::Update,
        }
    }

    /// True when no edit anywhere in the tree mutates the host.
    ///
    /// An `Update` with no prop edits and all-noop children counts as a no-op.
    pub fn is_noop_deep(&self) -> bool {
        match self {
            Edit::NoOp => true,
            Edit::Update { props, children } => {
                props.is_empty() && children.iter().all(Edit::is_noop_deep)
            }
            Edit::Create(_) | Edit::Remove | Edit::Replace(_) => false,
        }
    }

    pub fn summary(&self) -> EditSummary {
        let mut summary = EditSummary::default();
        let mut stack = vec![self];
        while let Some(edit) = stack.pop() {
            match edit {
                Edit::NoOp => summary.noops += 1,
                Edit::Create(_) => summary.creates += 1,
                Edit::Remove => summary.removes += 1,
                Edit::Replace(_) => summary.replaces += 1,
                Edit::Update { props, children } => {
                    summary.updates += 1;
                    for prop in props {
                        match prop {
                            PropEdit::SetProp { .. } => summary.set_props += 1,
                            PropEdit::RemoveProp { .. } => summary.remove_props += 1,
                        }
                    }
                    stack.extend(children.iter().rev());
                }
            }
        }
        summary
    }
}
