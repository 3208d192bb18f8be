//! In-place reconciliation of the node tree against a new description.
//!
//! Each matched node is patched before its children are visited. Children
//! match by key first, then by position when the existing child is unkeyed.
//! Anything left unmatched is built fresh; anything not reused is destroyed.

use smallvec::SmallVec;
use vulpis_core::Description;

use crate::builder::{sibling_keys, TreeBuilder};
use crate::node::{NodeId, NodeKind};
use crate::style::{patch_style, resolve_style, update};
use crate::tree::NodeTree;

/// Counts of what a reconciliation pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileReport {
    /// Nodes built fresh
    pub created: usize,
    /// Nodes destroyed
    pub removed: usize,
    /// Reused nodes whose fields changed
    pub patched: usize,
}

impl ReconcileReport {
    fn merge(&mut self, other: ReconcileReport) {
        self.created += other.created;
        self.removed += other.removed;
        self.patched += other.patched;
    }
}

/// Diffs descriptions against the existing tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct Reconciler {
    builder: TreeBuilder,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the whole tree, building it if there is no root yet.
    #[tracing::instrument(skip(self, tree, desc))]
    pub fn reconcile_root(&self, tree: &mut NodeTree, desc: &Description) -> ReconcileReport {
        let report = match tree.root() {
            Some(root) => self.reconcile(tree, root, desc, desc.key.as_deref()),
            None => {
                self.builder.build_root(tree, desc);
                ReconcileReport {
                    created: tree.len(),
                    ..Default::default()
                }
            }
        };
        tracing::debug!(
            created = report.created,
            removed = report.removed,
            patched = report.patched,
            "reconciled tree"
        );
        report
    }

    /// Patch `id` to match `desc`, then reconcile its children.
    pub fn reconcile(
        &self,
        tree: &mut NodeTree,
        id: NodeId,
        desc: &Description,
        key: Option<&str>,
    ) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        if self.patch(tree, id, desc, key) {
            report.patched += 1;
        }
        report.merge(self.reconcile_children(tree, id, desc));
        report
    }

    /// Patch one node's own fields. Returns whether anything changed.
    fn patch(&self, tree: &mut NodeTree, id: NodeId, desc: &Description, key: Option<&str>) -> bool {
        let Some(node) = tree.get_mut(id) else {
            return false;
        };

        let mut layout = false;
        update(&mut node.kind, NodeKind::from_tag(&desc.kind), &mut layout);
        update(&mut node.text, desc.text.clone().unwrap_or_default(), &mut layout);
        update(&mut node.font, desc.font, &mut layout);
        let change = patch_style(&mut node.style, resolve_style(desc));
        layout |= change.layout;

        let mut rekeyed = false;
        update(&mut node.key, key.map(str::to_string), &mut rekeyed);

        // Rebound every pass; dropping the old handle releases it.
        node.on_click = desc.on_click.clone();

        if layout {
            tree.mark_layout_dirty(id);
        }
        if change.paint {
            tree.mark_paint_dirty(id);
        }
        layout || change.paint || rekeyed
    }

    fn reconcile_children(&self, tree: &mut NodeTree, id: NodeId, desc: &Description) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let old: SmallVec<[NodeId; 4]> = SmallVec::from_slice(tree.children(id));
        let mut used = vec![false; old.len()];
        let mut next: SmallVec<[NodeId; 4]> = SmallVec::with_capacity(desc.children.len());
        let mut built_any = false;

        for (index, (child, key)) in desc
            .children
            .iter()
            .zip(sibling_keys(&desc.children))
            .enumerate()
        {
            match self.find_match(tree, &old, &used, index, key) {
                Some(slot) => {
                    used[slot] = true;
                    report.merge(self.reconcile(tree, old[slot], child, key));
                    next.push(old[slot]);
                }
                None => {
                    let fresh = self.builder.build(tree, child, key);
                    report.created += child.subtree_len();
                    built_any = true;
                    next.push(fresh);
                }
            }
        }

        for (slot, &child) in old.iter().enumerate() {
            if !used[slot] {
                report.removed += tree.remove_subtree(child);
            }
        }

        let reordered = next != old;
        tree.set_children(id, next);
        if reordered || report.removed > 0 || built_any {
            tree.mark_layout_dirty(id);
        }
        if built_any {
            tree.mark_paint_dirty(id);
        }
        report
    }

    /// Slot in `old` for the new entry at `index`: the first unused child
    /// with the same key, else the child at the same index if it is unkeyed.
    fn find_match(
        &self,
        tree: &NodeTree,
        old: &[NodeId],
        used: &[bool],
        index: usize,
        key: Option<&str>,
    ) -> Option<usize> {
        let key_of = |id: NodeId| tree.get(id).and_then(|n| n.key.as_deref());

        if let Some(key) = key {
            let by_key = old
                .iter()
                .enumerate()
                .position(|(slot, &c)| !used[slot] && key_of(c) == Some(key));
            if by_key.is_some() {
                return by_key;
            }
        }

        match old.get(index) {
            Some(&c) if !used[index] && key_of(c).is_none() => Some(index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vulpis_core::{Color, HandlerRef, StateStore};

    fn settle(tree: &mut NodeTree) {
        tree.clear_layout_dirty();
        tree.clear_paint_dirty();
    }

    #[test]
    fn test_builds_when_empty() {
        let mut tree = NodeTree::new();
        let report = Reconciler::new().reconcile_root(
            &mut tree,
            &Description::column().child(Description::rect()),
        );
        assert_eq!(report.created, 2);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_same_description_is_stable() {
        let desc = Description::column()
            .style("padding", 10)
            .child(Description::text("a").key("a"))
            .child(Description::rect().style("width", "50%"));

        let reconciler = Reconciler::new();
        let mut tree = NodeTree::new();
        reconciler.reconcile_root(&mut tree, &desc);
        settle(&mut tree);

        let report = reconciler.reconcile_root(&mut tree, &desc);
        assert_eq!(report, ReconcileReport::default());
        assert_eq!(tree.dirty_count(), 0);
    }

    #[test]
    fn test_paint_change_does_not_force_layout() {
        let reconciler = Reconciler::new();
        let mut tree = NodeTree::new();
        reconciler.reconcile_root(
            &mut tree,
            &Description::column().child(Description::rect().style("backgroundColor", "#000000")),
        );
        settle(&mut tree);

        reconciler.reconcile_root(
            &mut tree,
            &Description::column().child(Description::rect().style("backgroundColor", "#FFFFFF")),
        );
        assert!(tree.needs_paint());
        assert!(!tree.needs_layout());

        let root = tree.root().unwrap();
        let child = tree.get(tree.children(root)[0]).unwrap();
        assert_eq!(child.style.background, Some(Color::WHITE));
    }

    #[test]
    fn test_layout_change_dirties_ancestors() {
        let reconciler = Reconciler::new();
        let mut tree = NodeTree::new();
        let build = |w: i32| {
            Description::column().child(Description::row().child(Description::rect().style("width", w)))
        };
        reconciler.reconcile_root(&mut tree, &build(10));
        settle(&mut tree);

        let report = reconciler.reconcile_root(&mut tree, &build(20));
        assert_eq!(report.patched, 1);
        assert_eq!(report.created, 0);
        let dirty: Vec<bool> = tree
            .descendants(tree.root().unwrap())
            .map(|id| tree.get(id).unwrap().layout_dirty)
            .collect();
        assert_eq!(dirty, vec![true, true, true]);
    }

    #[test]
    fn test_keyed_match_beats_position() {
        let reconciler = Reconciler::new();
        let mut tree = NodeTree::new();
        reconciler.reconcile_root(
            &mut tree,
            &Description::column()
                .child(Description::rect().key("x"))
                .child(Description::rect()),
        );
        let root = tree.root().unwrap();
        let keyed = tree.children(root)[0];
        let unkeyed = tree.children(root)[1];
        settle(&mut tree);

        reconciler.reconcile_root(
            &mut tree,
            &Description::column()
                .child(Description::rect())
                .child(Description::rect().key("x")),
        );
        // Slot 0 holds a keyed child, so the new unkeyed entry cannot take it.
        let children = tree.children(root).to_vec();
        assert_eq!(children[1], keyed);
        assert_ne!(children[0], unkeyed);
        assert!(!tree.contains(unkeyed));
    }

    #[test]
    fn test_keyed_entry_falls_back_to_unkeyed_slot() {
        let reconciler = Reconciler::new();
        let mut tree = NodeTree::new();
        reconciler.reconcile_root(&mut tree, &Description::column().child(Description::rect()));
        let root = tree.root().unwrap();
        let original = tree.children(root)[0];
        settle(&mut tree);

        reconciler.reconcile_root(
            &mut tree,
            &Description::column().child(Description::rect().key("k")),
        );
        assert_eq!(tree.children(root), &[original]);
        assert_eq!(tree.get(original).unwrap().key.as_deref(), Some("k"));
    }

    #[test]
    fn test_kind_change_patches_in_place() {
        let reconciler = Reconciler::new();
        let mut tree = NodeTree::new();
        reconciler.reconcile_root(&mut tree, &Description::column());
        let root = tree.root().unwrap();
        settle(&mut tree);

        reconciler.reconcile_root(&mut tree, &Description::row());
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.get(root).unwrap().kind, NodeKind::Row);
        assert!(tree.needs_layout());
    }

    #[test]
    fn test_handler_rebind_releases_old() {
        let reconciler = Reconciler::new();
        let mut tree = NodeTree::new();
        let first = HandlerRef::new(|_: &mut StateStore| Ok(()));
        let watch = first.downgrade();
        reconciler.reconcile_root(&mut tree, &Description::rect().on_click(first));
        assert_eq!(watch.live_handles(), 1);

        let second = HandlerRef::new(|_: &mut StateStore| Ok(()));
        reconciler.reconcile_root(&mut tree, &Description::rect().on_click(second.clone()));
        assert_eq!(watch.live_handles(), 0);
        assert_eq!(second.handle_count(), 2);
    }
}
