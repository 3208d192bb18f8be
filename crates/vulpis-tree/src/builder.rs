//! Materializing fresh nodes from descriptions.

use std::collections::HashSet;

use smallvec::SmallVec;
use vulpis_core::Description;

use crate::node::{NodeId, NodeKind};
use crate::style::resolve_style;
use crate::tree::NodeTree;

/// Builds fresh node subtrees. Every built node starts layout- and
/// paint-dirty.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeBuilder;

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a detached subtree for `desc` with the given sibling key.
    pub fn build(&self, tree: &mut NodeTree, desc: &Description, key: Option<&str>) -> NodeId {
        let id = tree.insert(NodeKind::from_tag(&desc.kind));
        if let Some(node) = tree.get_mut(id) {
            node.key = key.map(str::to_string);
            node.style = resolve_style(desc);
            node.text = desc.text.clone().unwrap_or_default();
            node.font = desc.font;
            node.on_click = desc.on_click.clone();
        }

        let children: SmallVec<[NodeId; 4]> = desc
            .children
            .iter()
            .zip(sibling_keys(&desc.children))
            .map(|(child, child_key)| self.build(tree, child, child_key))
            .collect();
        tree.set_children(id, children);
        id
    }

    /// Build `desc` as the new root, replacing any existing tree.
    #[tracing::instrument(skip(self, tree, desc))]
    pub fn build_root(&self, tree: &mut NodeTree, desc: &Description) -> NodeId {
        let released = tree.clear();
        let key = desc.key.as_deref();
        let root = self.build(tree, desc, key);
        tree.set_root(root);
        tracing::debug!(nodes = tree.len(), released, "built tree");
        root
    }
}

/// Effective keys of a sibling list. The first occurrence of a key keeps it;
/// later duplicates are treated as unkeyed.
pub(crate) fn sibling_keys(children: &[Description]) -> Vec<Option<&str>> {
    let mut seen = HashSet::new();
    children
        .iter()
        .enumerate()
        .map(|(index, child)| {
            let key = child.key.as_deref()?;
            if seen.insert(key) {
                Some(key)
            } else {
                tracing::warn!(key, index, "duplicate sibling key; treating as unkeyed");
                None
            }
        })
        .collect()
}
