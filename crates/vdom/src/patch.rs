//! Applies edit trees to a live host tree.
//!
//! The patcher walks the edit tree and the host tree in lockstep, depth-first,
//! parent before children. It holds the host by `&mut` for the whole pass, so
//! two passes can never interleave on one host.
//!
//! Notes:
//! - `Create` always appends; the index it was diffed at is not used.
//! - Within one `Update`, trailing `Remove` edits are applied at an index
//!   shifted down by the removals already done, so each one still addresses
//!   a live child.
//! - Indices are not validated up front. A missing child surfaces as the
//!   host's `HostError::MissingChild`, and the pass stops there: nodes
//!   already patched stay patched.

use crate::edit::{Edit, PropEdit};
use crate::host::{HostAdapter, HostError};
use crate::node::ViewNode;

/// Host mutations performed by one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatchStats {
    pub created: usize,
    pub removed: usize,
    pub replaced: usize,
    pub updated: usize,
    pub props_set: usize,
    pub props_removed: usize,
}

impl PatchStats {
    pub fn total_mutations(&self) -> usize {
        self.created + self.removed + self.replaced + self.props_set + self.props_removed
    }
}

/// Initial render: materialises `node` and appends it under `root`.
pub fn mount<H: HostAdapter>(
    host: &mut H,
    root: H::Handle,
    node: &ViewNode,
) -> Result<H::Handle, HostError> {
    let handle = host.instantiate(node)?;
    host.append_child(root, handle)?;
    log::debug!(target: "vdom.patch", "mounted {} nodes under {root:?}", node.node_count());
    Ok(handle)
}

/// Applies `edit` to the first child of `root`.
pub fn apply<H: HostAdapter>(
    host: &mut H,
    root: H::Handle,
    edit: Edit,
) -> Result<PatchStats, HostError> {
    apply_at(host, root, edit, 0)
}

/// Applies `edit` to the child of `parent` at `index`.
pub fn apply_at<H: HostAdapter>(
    host: &mut H,
    parent: H::Handle,
    edit: Edit,
    index: usize,
) -> Result<PatchStats, HostError> {
    let mut patcher = Patcher::new(host);
    patcher.apply_at(parent, edit, index)?;
    let stats = patcher.finish();
    log::debug!(target: "vdom.patch", "patch done: {stats:?}");
    Ok(stats)
}

/// One patch pass over a host.
pub struct Patcher<'h, H: HostAdapter> {
    host: &'h mut H,
    stats: PatchStats,
}

impl<'h, H: HostAdapter> Patcher<'h, H> {
    pub fn new(host: &'h mut H) -> Self {
        Self {
            host,
            stats: PatchStats::default(),
        }
    }

    pub fn stats(&self) -> PatchStats {
        self.stats
    }

    pub fn finish(self) -> PatchStats {
        self.stats
    }

    pub fn apply_at(&mut self, parent: H::Handle, edit: Edit, index: usize) -> Result<(), HostError> {
        match edit {
            Edit::NoOp => {}
            Edit::Create(node) => {
                let child = self.host.instantiate(&node)?;
                if let Err(err) = self.host.append_child(parent, child) {
                    self.host.discard(child);
                    return Err(err);
                }
                self.stats.created += 1;
            }
            Edit::Remove => {
                self.host.remove_child(parent, index)?;
                self.stats.removed += 1;
            }
            Edit::Replace(node) => {
                // Resolve the slot first so a bad index creates nothing.
                self.host.child_at(parent, index)?;
                let child = self.host.instantiate(&node)?;
                if let Err(err) = self.host.replace_child(parent, index, child) {
                    self.host.discard(child);
                    return Err(err);
                }
                self.stats.replaced += 1;
            }
            Edit::Update { props, children } => {
                let target = self.host.child_at(parent, index)?;
                self.stats.updated += 1;
                self.apply_props(target, props)?;

                let mut removed = 0usize;
                for (j, child) in children.into_iter().enumerate() {
                    let is_remove = matches!(child, Edit::Remove);
                    self.apply_at(target, child, j - removed)?;
                    if is_remove {
                        removed += 1;
                    }
                }
            }
        }
        Ok(())
    }

    fn apply_props(&mut self, target: H::Handle, props: Vec<PropEdit>) -> Result<(), HostError> {
        for prop in props {
            match prop {
                PropEdit::SetProp { key, value } => {
                    log::trace!(target: "vdom.patch", "set {key}={value} on {target:?}");
                    self.host.set_prop(target, &key, &value)?;
                    self.stats.props_set += 1;
                }
                PropEdit::RemoveProp { key, value } => {
                    log::trace!(target: "vdom.patch", "remove {key} from {target:?}");
                    self.host.remove_prop(target, &key, &value)?;
                    self.stats.props_removed += 1;
                }
            }
        }
        Ok(())
    }
}
