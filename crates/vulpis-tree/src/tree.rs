//! The node arena.
//!
//! Nodes are addressed by [`NodeId`] handles and linked by parent/children id
//! lists. The parent link never owns anything: it only serves dirty
//! propagation and click bubbling.

use std::collections::HashMap;

use glam::Vec2;
use smallvec::SmallVec;

use crate::node::{Node, NodeId, NodeKind};

/// The materialized tree for one window.
#[derive(Debug, Clone)]
pub struct NodeTree {
    /// All live nodes, indexed by ID
    nodes: HashMap<NodeId, Node>,
    root: Option<NodeId>,
    /// Counter for generating unique IDs
    next_id: u64,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            root: None,
            next_id: 0,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Make `id` the root. It loses any parent link.
    pub fn set_root(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
            self.root = Some(id);
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child ids in order; empty for unknown nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Allocate a detached node of the given kind.
    pub fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, kind));
        id
    }

    /// Replace the child list of `parent`, re-linking every child to it.
    pub fn set_children(&mut self, parent: NodeId, children: SmallVec<[NodeId; 4]>) {
        for &child in &children {
            if let Some(node) = self.nodes.get_mut(&child) {
                node.parent = Some(parent);
            }
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children = children;
        }
    }

    /// Destroy a node and its whole subtree, detaching it from its parent.
    /// Dropping the nodes releases their handlers. Returns the number of
    /// nodes removed.
    pub fn remove_subtree(&mut self, id: NodeId) -> usize {
        let Some(parent) = self.nodes.get(&id).map(|n| n.parent) else {
            return 0;
        };
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children.iter().copied());
                removed += 1;
            }
        }
        removed
    }

    /// Set `layout_dirty` on a node and every ancestor up to the root.
    pub fn mark_layout_dirty(&mut self, id: NodeId) {
        let mut current = match self.nodes.get_mut(&id) {
            Some(node) => {
                node.layout_dirty = true;
                node.parent
            }
            None => return,
        };
        // An already-dirty ancestor implies its own ancestors are dirty.
        while let Some(parent_id) = current {
            let Some(parent) = self.nodes.get_mut(&parent_id) else {
                break;
            };
            if parent.layout_dirty {
                break;
            }
            parent.layout_dirty = true;
            current = parent.parent;
        }
    }

    /// Set `paint_dirty` on a node and every ancestor up to the root.
    pub fn mark_paint_dirty(&mut self, id: NodeId) {
        let mut current = match self.nodes.get_mut(&id) {
            Some(node) => {
                node.paint_dirty = true;
                node.parent
            }
            None => return,
        };
        while let Some(parent_id) = current {
            let Some(parent) = self.nodes.get_mut(&parent_id) else {
                break;
            };
            if parent.paint_dirty {
                break;
            }
            parent.paint_dirty = true;
            current = parent.parent;
        }
    }

    /// Whether the tree needs a layout pass.
    pub fn needs_layout(&self) -> bool {
        self.root
            .and_then(|r| self.nodes.get(&r))
            .is_some_and(|n| n.layout_dirty)
    }

    /// Whether the tree needs repainting.
    pub fn needs_paint(&self) -> bool {
        self.root
            .and_then(|r| self.nodes.get(&r))
            .is_some_and(|n| n.paint_dirty)
    }

    pub fn clear_layout_dirty(&mut self) {
        for node in self.nodes.values_mut() {
            node.layout_dirty = false;
        }
    }

    pub fn clear_paint_dirty(&mut self) {
        for node in self.nodes.values_mut() {
            node.paint_dirty = false;
        }
    }

    /// Number of nodes with either dirty flag set.
    pub fn dirty_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| n.layout_dirty || n.paint_dirty)
            .count()
    }

    /// Pre-order walk of the subtree rooted at `id`, including `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = if self.nodes.contains_key(&id) {
            vec![id]
        } else {
            Vec::new()
        };
        Descendants { tree: self, stack }
    }

    /// Find the deepest node whose box contains the point.
    ///
    /// Later siblings are painted on top, so they are tested first.
    pub fn hit_test(&self, point: Vec2) -> Option<NodeId> {
        self.root.and_then(|r| self.hit_test_recursive(r, point))
    }

    fn hit_test_recursive(&self, id: NodeId, point: Vec2) -> Option<NodeId> {
        let node = self.nodes.get(&id)?;
        if !node.bounds.contains(point) {
            return None;
        }
        node.children
            .iter()
            .rev()
            .find_map(|&child| self.hit_test_recursive(child, point))
            .or(Some(id))
    }

    /// Tear down the whole tree, releasing every handler. Returns the number
    /// of nodes destroyed.
    pub fn clear(&mut self) -> usize {
        let count = self.nodes.len();
        self.nodes.clear();
        self.root = None;
        count
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a NodeTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vulpis_core::Bounds;

    fn chain(tree: &mut NodeTree) -> (NodeId, NodeId, NodeId) {
        let root = tree.insert(NodeKind::Column);
        let mid = tree.insert(NodeKind::Row);
        let leaf = tree.insert(NodeKind::Rectangle);
        tree.set_root(root);
        tree.set_children(root, SmallVec::from_slice(&[mid]));
        tree.set_children(mid, SmallVec::from_slice(&[leaf]));
        tree.clear_layout_dirty();
        tree.clear_paint_dirty();
        (root, mid, leaf)
    }

    #[test]
    fn test_insert_and_link() {
        let mut tree = NodeTree::new();
        let (root, mid, leaf) = chain(&mut tree);

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.children(root), &[mid]);
        assert_eq!(tree.parent(leaf), Some(mid));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.dirty_count(), 0);
    }

    #[test]
    fn test_dirty_propagates_to_root() {
        let mut tree = NodeTree::new();
        let (root, mid, leaf) = chain(&mut tree);

        tree.mark_layout_dirty(leaf);
        assert!(tree.get(mid).unwrap().layout_dirty);
        assert!(tree.get(root).unwrap().layout_dirty);
        assert!(tree.needs_layout());
        assert!(!tree.needs_paint());

        tree.clear_layout_dirty();
        tree.mark_paint_dirty(mid);
        assert!(!tree.get(leaf).unwrap().paint_dirty);
        assert!(tree.needs_paint());
        assert!(!tree.needs_layout());
    }

    #[test]
    fn test_remove_subtree() {
        let mut tree = NodeTree::new();
        let (root, mid, leaf) = chain(&mut tree);

        assert_eq!(tree.remove_subtree(mid), 2);
        assert!(!tree.contains(leaf));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.remove_subtree(mid), 0);
    }

    #[test]
    fn test_descendants_pre_order() {
        let mut tree = NodeTree::new();
        let (root, mid, leaf) = chain(&mut tree);
        let sibling = tree.insert(NodeKind::Text);
        tree.set_children(root, SmallVec::from_slice(&[mid, sibling]));

        let order: Vec<NodeId> = tree.descendants(root).collect();
        assert_eq!(order, vec![root, mid, leaf, sibling]);
    }

    #[test]
    fn test_hit_test() {
        let mut tree = NodeTree::new();
        let (root, mid, leaf) = chain(&mut tree);
        tree.get_mut(root).unwrap().bounds = Bounds::new(0.0, 0.0, 800.0, 600.0);
        tree.get_mut(mid).unwrap().bounds = Bounds::new(100.0, 100.0, 200.0, 100.0);
        tree.get_mut(leaf).unwrap().bounds = Bounds::new(100.0, 100.0, 50.0, 50.0);

        assert_eq!(tree.hit_test(Vec2::new(120.0, 120.0)), Some(leaf));
        assert_eq!(tree.hit_test(Vec2::new(250.0, 150.0)), Some(mid));
        assert_eq!(tree.hit_test(Vec2::new(50.0, 50.0)), Some(root));
        // Right edge is exclusive
        assert_eq!(tree.hit_test(Vec2::new(150.0, 120.0)), Some(mid));
        assert_eq!(tree.hit_test(Vec2::new(1000.0, 1000.0)), None);
    }

    #[test]
    fn test_clear() {
        let mut tree = NodeTree::new();
        chain(&mut tree);
        assert_eq!(tree.clear(), 3);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }
}
