use crate::config::HostConfig;
use vdom::snapshot::{SnapshotOptions, ViewSnapshot};
use vdom::{Element, HostAdapter, HostError, HostTree, PropValue, Props, ViewNode};

/// Opaque handle of a node in a [`DomStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub u32);

impl NodeKey {
    /// The mount point every store starts with.
    pub const ROOT: NodeKey = NodeKey(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// In-memory host tree.
///
/// Nodes live in an arena and are addressed by [`NodeKey`]. Removing a node
/// retires its whole subtree; retired keys are never reused.
///
/// Retired records are not reclaimed, so the arena grows with every node
/// ever created (see [`DomStore::arena_len`]). A long-running driver pays
/// one record per created or replaced node per pass.
pub struct DomStore {
    config: HostConfig,
    arena: DomArena,
}

impl DomStore {
    pub fn new() -> Self {
        Self::with_config(HostConfig::default())
    }

    pub fn with_config(config: HostConfig) -> Self {
        let mut arena = DomArena::new();
        arena.insert_node(NodeKind::Root);
        Self { config, arena }
    }

    pub fn root(&self) -> NodeKey {
        NodeKey::ROOT
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn is_live(&self, key: NodeKey) -> bool {
        self.arena.get(key).is_ok()
    }

    /// Live nodes, including the root and detached subtrees.
    pub fn live_count(&self) -> usize {
        self.arena.nodes.iter().filter(|n| n.live).count()
    }

    /// Records ever allocated, live or retired.
    pub fn arena_len(&self) -> usize {
        self.arena.nodes.len()
    }

    pub fn parent(&self, key: NodeKey) -> Result<Option<NodeKey>, HostError> {
        Ok(self.arena.get(key)?.parent)
    }

    pub fn attribute(&self, key: NodeKey, name: &str) -> Option<&PropValue> {
        match &self.arena.get(key).ok()?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(attr, _)| attr == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn text(&self, key: NodeKey) -> Option<&str> {
        match &self.arena.get(key).ok()?.kind {
            NodeKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Drops everything mounted under the root.
    pub fn clear(&mut self) {
        let children = std::mem::take(&mut self.arena.nodes[0].children);
        for child in children {
            self.arena.retire_subtree(child);
        }
    }

    /// Reads a subtree back as a view tree.
    ///
    /// Attributes keep their host names (`class`, not `className`). The root
    /// reads back as a [`ViewNode::Nested`] of its children.
    pub fn materialize(&self, key: NodeKey) -> Result<ViewNode, HostError> {
        let record = self.arena.get(key)?;
        let children = record
            .children
            .iter()
            .map(|child| self.materialize(*child))
            .collect::<Result<Vec<_>, _>>()?;
        let node = match &record.kind {
            NodeKind::Root => ViewNode::Nested(children),
            NodeKind::Element { tag, attributes } => ViewNode::Element(Element {
                tag: tag.clone(),
                props: attributes.iter().cloned().collect::<Props>(),
                children,
            }),
            NodeKind::Text { text } => ViewNode::Text(text.clone()),
        };
        Ok(node)
    }

    pub fn snapshot(
        &self,
        key: NodeKey,
        options: SnapshotOptions,
    ) -> Result<ViewSnapshot, HostError> {
        Ok(ViewSnapshot::new(&self.materialize(key)?, options))
    }

    fn attributes_mut(
        &mut self,
        key: NodeKey,
    ) -> Result<&mut Vec<(String, PropValue)>, HostError> {
        match &mut self.arena.get_mut(key)?.kind {
            NodeKind::Element { attributes, .. } => Ok(attributes),
            _ => Err(HostError::NotAContainer),
        }
    }
}

impl Default for DomStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HostTree for DomStore {
    type Handle = NodeKey;

    fn child_count(&self, parent: NodeKey) -> Result<usize, HostError> {
        Ok(self.arena.get(parent)?.children.len())
    }

    fn child_at(&self, parent: NodeKey, index: usize) -> Result<NodeKey, HostError> {
        let children = &self.arena.get(parent)?.children;
        children.get(index).copied().ok_or(HostError::MissingChild {
            index,
            len: children.len(),
        })
    }

    fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), HostError> {
        self.arena.check_attachable(parent, child)?;
        self.arena.get_mut(parent)?.children.push(child);
        self.arena.get_mut(child)?.parent = Some(parent);
        log::trace!(target: "dom_store", "append {child:?} to {parent:?}");
        Ok(())
    }

    fn remove_child(&mut self, parent: NodeKey, index: usize) -> Result<(), HostError> {
        let child = self.child_at(parent, index)?;
        self.arena.get_mut(parent)?.children.remove(index);
        self.arena.retire_subtree(child);
        log::trace!(target: "dom_store", "remove {child:?} at {parent:?}[{index}]");
        Ok(())
    }

    fn replace_child(
        &mut self,
        parent: NodeKey,
        index: usize,
        child: NodeKey,
    ) -> Result<(), HostError> {
        let old = self.child_at(parent, index)?;
        self.arena.check_attachable(parent, child)?;
        self.arena.get_mut(parent)?.children[index] = child;
        self.arena.get_mut(child)?.parent = Some(parent);
        self.arena.retire_subtree(old);
        log::trace!(target: "dom_store", "replace {old:?} with {child:?} at {parent:?}[{index}]");
        Ok(())
    }
}

impl HostAdapter for DomStore {
    fn create_element(&mut self, tag: &str) -> Result<NodeKey, HostError> {
        if tag.is_empty() {
            return Err(HostError::MissingTag);
        }
        Ok(self.arena.insert_node(NodeKind::Element {
            tag: tag.to_string(),
            attributes: Vec::new(),
        }))
    }

    fn create_text(&mut self, text: &str) -> Result<NodeKey, HostError> {
        Ok(self.arena.insert_node(NodeKind::Text {
            text: text.to_string(),
        }))
    }

    fn set_prop(&mut self, node: NodeKey, key: &str, value: &PropValue) -> Result<(), HostError> {
        let name = self.config.attribute_name(key).to_string();
        let attributes = self.attributes_mut(node)?;
        match attributes.iter_mut().find(|(attr, _)| *attr == name) {
            Some(slot) => slot.1 = value.clone(),
            None => attributes.push((name, value.clone())),
        }
        Ok(())
    }

    fn remove_prop(&mut self, node: NodeKey, key: &str, _value: &PropValue) -> Result<(), HostError> {
        let name = self.config.attribute_name(key).to_string();
        self.attributes_mut(node)?.retain(|(attr, _)| *attr != name);
        Ok(())
    }

    fn discard(&mut self, node: NodeKey) {
        let detached = self
            .arena
            .get(node)
            .is_ok_and(|record| record.parent.is_none() && !matches!(record.kind, NodeKind::Root));
        if detached {
            self.arena.retire_subtree(node);
            log::trace!(target: "dom_store", "discard detached {node:?}");
        }
    }
}

struct DomArena {
    nodes: Vec<NodeRecord>,
}

impl DomArena {
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn insert_node(&mut self, kind: NodeKind) -> NodeKey {
        let key = NodeKey(self.nodes.len() as u32);
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
            live: true,
        });
        key
    }

    fn get(&self, key: NodeKey) -> Result<&NodeRecord, HostError> {
        self.nodes
            .get(key.index())
            .filter(|record| record.live)
            .ok_or(HostError::UnknownNode)
    }

    fn get_mut(&mut self, key: NodeKey) -> Result<&mut NodeRecord, HostError> {
        self.nodes
            .get_mut(key.index())
            .filter(|record| record.live)
            .ok_or(HostError::UnknownNode)
    }

    fn check_attachable(&self, parent: NodeKey, child: NodeKey) -> Result<(), HostError> {
        if parent == child || self.is_descendant(child, parent) {
            return Err(HostError::Cycle);
        }
        if !self.get(parent)?.allows_children() {
            return Err(HostError::NotAContainer);
        }
        let record = self.get(child)?;
        if record.parent.is_some() || matches!(record.kind, NodeKind::Root) {
            return Err(HostError::AlreadyAttached);
        }
        Ok(())
    }

    fn retire_subtree(&mut self, key: NodeKey) {
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            let Some(record) = self.nodes.get_mut(current.index()) else {
                continue;
            };
            record.live = false;
            record.parent = None;
            stack.append(&mut record.children);
        }
    }

    fn is_descendant(&self, ancestor: NodeKey, maybe_descendant: NodeKey) -> bool {
        let Ok(record) = self.get(ancestor) else {
            return false;
        };
        let mut stack = record.children.clone();
        while let Some(current) = stack.pop() {
            if current == maybe_descendant {
                return true;
            }
            if let Ok(record) = self.get(current) {
                stack.extend(record.children.iter().copied());
            }
        }
        false
    }
}

struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    live: bool,
}

impl NodeRecord {
    fn allows_children(&self) -> bool {
        matches!(self.kind, NodeKind::Root | NodeKind::Element { .. })
    }
}

enum NodeKind {
    Root,
    Element {
        tag: String,
        attributes: Vec<(String, PropValue)>,
    },
    Text {
        text: String,
    },
}
