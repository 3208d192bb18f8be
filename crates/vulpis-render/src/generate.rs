//! Command generation from a laid-out node tree.

use glam::Vec2;
use vulpis_core::FontProvider;
use vulpis_tree::{Node, NodeId, NodeKind, NodeTree};

use crate::command::RenderCommandList;

/// Turns a positioned tree into an ordered command list.
///
/// Per node the order is: background fill, clip push, text lines, children,
/// clip pop.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandGenerator;

impl CommandGenerator {
    pub fn new() -> Self {
        Self
    }

    #[tracing::instrument(skip_all)]
    pub fn generate(&self, tree: &NodeTree, fonts: &dyn FontProvider) -> RenderCommandList {
        let mut list = RenderCommandList::new();
        if let Some(root) = tree.root() {
            let mut builder = ListBuilder {
                list: &mut list,
                tree,
                fonts,
            };
            builder.build_node(root);
        }
        tracing::debug!(commands = list.len(), "generated commands");
        list
    }
}

struct ListBuilder<'a> {
    list: &'a mut RenderCommandList,
    tree: &'a NodeTree,
    fonts: &'a dyn FontProvider,
}

impl ListBuilder<'_> {
    fn build_node(&mut self, id: NodeId) {
        let tree = self.tree;
        let Some(node) = tree.get(id) else {
            return;
        };

        if let Some(color) = node.style.background {
            self.list.fill_rect(node.bounds, color);
        }
        if node.style.overflow_hidden {
            self.list.push_clip(node.bounds);
        }

        match node.kind {
            NodeKind::Text => self.build_text(node),
            NodeKind::Row | NodeKind::Column | NodeKind::Rectangle => {}
        }

        for &child in &node.children {
            self.build_node(child);
        }

        if node.style.overflow_hidden {
            self.list.pop_clip();
        }
    }

    fn build_text(&mut self, node: &Node) {
        let Some(font) = node.font else {
            return;
        };
        let Some(metrics) = self.fonts.metrics(font) else {
            return;
        };

        let content = node.content_box();
        let mut cursor = Vec2::new(content.x, content.y + metrics.ascent);
        for line in &node.lines {
            if !line.text.is_empty() {
                self.list
                    .draw_text(line.text.as_str(), font, cursor.x, cursor.y, node.style.text_color);
            }
            cursor.y += node.line_height;
        }
    }
}
