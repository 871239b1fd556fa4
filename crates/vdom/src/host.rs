//! Host tree contract.
//!
//! The diff never sees a host. The patcher only talks to one through these
//! two traits: [`HostTree`] for structure, [`HostAdapter`] for node creation
//! and props. Everything host-specific (attribute naming, class handling,
//! how text is stored) lives in the implementation.

use crate::node::{PropValue, Props, ViewNode};
use std::fmt::Debug;

/// Faults raised by a host. The diff and the patcher add none of their own.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("no child at index {index} (parent has {len})")]
    MissingChild { index: usize, len: usize },
    #[error("node handle is unknown or already removed")]
    UnknownNode,
    #[error("node cannot hold children or props")]
    NotAContainer,
    #[error("node already has a parent")]
    AlreadyAttached,
    #[error("appending would make a node its own ancestor")]
    Cycle,
    #[error("element has an empty tag")]
    MissingTag,
    #[error("cannot instantiate {0}")]
    UnsupportedNode(&'static str),
}

/// Index-addressed structure of a live host tree.
pub trait HostTree {
    type Handle: Copy + Eq + Debug;

    fn child_count(&self, parent: Self::Handle) -> Result<usize, HostError>;

    fn child_at(&self, parent: Self::Handle, index: usize) -> Result<Self::Handle, HostError>;

    fn append_child(&mut self, parent: Self::Handle, child: Self::Handle) -> Result<(), HostError>;

    /// Detaches and drops the child at `index` along with its subtree.
    fn remove_child(&mut self, parent: Self::Handle, index: usize) -> Result<(), HostError>;

    /// Puts `child` at `index`, dropping the node that was there.
    fn replace_child(
        &mut self,
        parent: Self::Handle,
        index: usize,
        child: Self::Handle,
    ) -> Result<(), HostError>;
}

/// Node creation and prop access on top of a [`HostTree`].
pub trait HostAdapter: HostTree {
    fn create_element(&mut self, tag: &str) -> Result<Self::Handle, HostError>;

    fn create_text(&mut self, text: &str) -> Result<Self::Handle, HostError>;

    fn set_prop(
        &mut self,
        node: Self::Handle,
        key: &str,
        value: &PropValue,
    ) -> Result<(), HostError>;

    /// `value` is the old value being removed; hosts may ignore it.
    fn remove_prop(
        &mut self,
        node: Self::Handle,
        key: &str,
        value: &PropValue,
    ) -> Result<(), HostError>;

    /// Drops a detached node created by this adapter, with its subtree.
    ///
    /// Called when a freshly built subtree could not be attached. Hosts that
    /// do not track node lifetimes can keep the default.
    fn discard(&mut self, _node: Self::Handle) {}

    /// Materialises a detached host subtree for `node`.
    ///
    /// Every prop is set in insertion order before children are appended. On
    /// failure the partially built subtree is discarded.
    fn instantiate(&mut self, node: &ViewNode) -> Result<Self::Handle, HostError> {
        match node {
            ViewNode::Text(text) => self.create_text(text),
            ViewNode::Element(element) => {
                let handle = self.create_element(&element.tag)?;
                if let Err(err) = fill_element(self, handle, &element.props, &element.children) {
                    self.discard(handle);
                    return Err(err);
                }
                Ok(handle)
            }
            ViewNode::Nested(_) => Err(HostError::UnsupportedNode("nested child sequence")),
        }
    }
}

fn fill_element<H: HostAdapter + ?Sized>(
    host: &mut H,
    handle: H::Handle,
    props: &Props,
    children: &[ViewNode],
) -> Result<(), HostError> {
    for (key, value) in props {
        host.set_prop(handle, key, value)?;
    }
    for child in children {
        let child = host.instantiate(child)?;
        if let Err(err) = host.append_child(handle, child) {
            host.discard(child);
            return Err(err);
        }
    }
    Ok(())
}
