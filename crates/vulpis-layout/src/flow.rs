//! The two-pass flow/flex solver.
//!
//! The measure pass walks the tree post-order and assigns every node its
//! requested or intrinsic size. The compute pass walks pre-order, resolves
//! percentages against the final parent content box, distributes free space
//! and places each child in absolute coordinates.

use smallvec::SmallVec;
use vulpis_core::{FontProvider, Size};
use vulpis_tree::{Align, Node, NodeId, NodeKind, NodeStyle, NodeTree};

use crate::flex::{distribute_flex, justify_spacing};
use crate::text::{block_width, wrap_text};
use crate::{LayoutOptions, LayoutSolver};

/// Definite extents available for resolving percentages.
#[derive(Debug, Clone, Copy, Default)]
struct Extent {
    width: Option<f32>,
    height: Option<f32>,
}

impl Extent {
    fn definite(size: Size) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
        }
    }
}

/// Stack layout with flex growth, justification and cross-axis alignment.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlowLayout;

impl FlowLayout {
    pub fn new() -> Self {
        Self
    }

    fn measure(
        &self,
        tree: &mut NodeTree,
        id: NodeId,
        parent: Extent,
        fallback: Extent,
        fonts: &dyn FontProvider,
    ) {
        let Some(node) = tree.get(id) else {
            return;
        };
        let kind = node.kind;
        let style = node.style.clone();
        let children: SmallVec<[NodeId; 4]> = node.children.clone();

        let requested_width = style
            .width
            .resolve(parent.width)
            .or(fallback.width)
            .map(|w| style.clamp_width(w));
        let requested_height = style
            .height
            .resolve(parent.height)
            .or(fallback.height)
            .map(|h| style.clamp_height(h));

        let inner = Extent {
            width: requested_width.map(|w| (w - style.padding.horizontal()).max(0.0)),
            height: requested_height.map(|h| (h - style.padding.vertical()).max(0.0)),
        };
        for &child in &children {
            self.measure(tree, child, inner, Extent::default(), fonts);
        }

        let (content_width, content_height) = match kind {
            NodeKind::Text => measure_text(tree, id, &style, inner.width, fonts),
            NodeKind::Row => stack_extent(tree, &children, true, style.spacing),
            NodeKind::Column | NodeKind::Rectangle => {
                stack_extent(tree, &children, false, style.spacing)
            }
        };

        let width = requested_width
            .unwrap_or_else(|| style.clamp_width(content_width + style.padding.horizontal()));
        let height = requested_height
            .unwrap_or_else(|| style.clamp_height(content_height + style.padding.vertical()));

        if let Some(node) = tree.get_mut(id) {
            node.bounds.width = width;
            node.bounds.height = height;
        }
    }

    fn compute(&self, tree: &mut NodeTree, id: NodeId, fonts: &dyn FontProvider) {
        let Some(node) = tree.get(id) else {
            return;
        };
        let kind = node.kind;
        let style = node.style.clone();
        let children: SmallVec<[NodeId; 4]> = node.children.clone();
        let content = node.content_box();

        if kind == NodeKind::Text {
            rewrap_text(tree, id, content.width, fonts);
        }
        if children.is_empty() {
            return;
        }

        for &child in &children {
            if let Some(c) = tree.get_mut(child) {
                resolve_percentages(c, Size::new(content.width, content.height));
            }
        }

        let horizontal = kind.is_horizontal();
        let (main_start, main_avail, cross_start, cross_avail) = if horizontal {
            (content.x, content.width, content.y, content.height)
        } else {
            (content.y, content.height, content.x, content.width)
        };

        let count = children.len();
        let mut used = style.spacing * count.saturating_sub(1) as f32;
        let mut grows = Vec::with_capacity(count);
        for &child in &children {
            if let Some(c) = tree.get(child) {
                used += main_outer(c, horizontal);
                grows.push(c.style.flex_grow);
            } else {
                grows.push(0.0);
            }
        }
        let free = main_avail - used;
        let total_grow: f32 = grows.iter().sum();

        // Any flex weight turns justification off, even with no space to grow into.
        let (offset, gap) = if total_grow > 0.0 {
            if free > 0.0 {
                let alloc = distribute_flex(free, &grows);
                for (&child, add) in children.iter().zip(alloc) {
                    if let Some(c) = tree.get_mut(child) {
                        if horizontal {
                            c.bounds.width = c.style.clamp_width(c.bounds.width + add);
                        } else {
                            c.bounds.height = c.style.clamp_height(c.bounds.height + add);
                        }
                    }
                }
            }
            (0.0, style.spacing)
        } else {
            justify_spacing(style.justify_content, free, count, style.spacing)
        };

        let stretch = style.align_items == Align::Stretch;
        let mut cursor = main_start + offset;
        for &child in &children {
            if stretch {
                if let Some(c) = tree.get_mut(child) {
                    let margin = c.style.margin;
                    if horizontal {
                        c.bounds.height = c.style.clamp_height(cross_avail - margin.vertical());
                    } else {
                        c.bounds.width = c.style.clamp_width(cross_avail - margin.horizontal());
                    }
                }
            }
            // A stretched row child keeps its stretched height.
            if !(horizontal && stretch) {
                fit_text_height(tree, child, fonts);
            }

            let Some(c) = tree.get_mut(child) else {
                continue;
            };
            let margin = c.style.margin;
            if horizontal {
                c.bounds.y = align_cross(
                    style.align_items,
                    cross_start,
                    cross_avail,
                    c.bounds.height,
                    margin.top,
                    margin.bottom,
                );
                c.bounds.x = cursor + margin.left;
                cursor += c.bounds.width + margin.horizontal() + gap;
            } else {
                c.bounds.x = align_cross(
                    style.align_items,
                    cross_start,
                    cross_avail,
                    c.bounds.width,
                    margin.left,
                    margin.right,
                );
                c.bounds.y = cursor + margin.top;
                cursor += c.bounds.height + margin.vertical() + gap;
            }
        }

        for &child in &children {
            self.compute(tree, child, fonts);
        }
    }
}

impl LayoutSolver for FlowLayout {
    #[tracing::instrument(skip_all)]
    fn solve(&mut self, tree: &mut NodeTree, options: &LayoutOptions, fonts: &dyn FontProvider) {
        let Some(root) = tree.root() else {
            return;
        };
        let viewport = Extent::definite(options.viewport());
        self.measure(tree, root, viewport, viewport, fonts);

        if let Some(node) = tree.get_mut(root) {
            node.bounds.x = node.style.margin.left;
            node.bounds.y = node.style.margin.top;
        }
        self.compute(tree, root, fonts);
        tracing::debug!(nodes = tree.len(), "solved layout");
    }
}

/// Wrap a text node's string for measuring and return its block size.
fn measure_text(
    tree: &mut NodeTree,
    id: NodeId,
    style: &NodeStyle,
    width: Option<f32>,
    fonts: &dyn FontProvider,
) -> (f32, f32) {
    let wrap_width = width.unwrap_or((style.max_width - style.padding.horizontal()).max(0.0));
    rewrap_text(tree, id, wrap_width, fonts);
    match tree.get(id) {
        Some(node) => (
            block_width(&node.lines),
            node.lines.len() as f32 * node.line_height,
        ),
        None => (0.0, 0.0),
    }
}

/// Refresh the cached lines of a text node. An unresolvable font leaves the
/// node without lines.
fn rewrap_text(tree: &mut NodeTree, id: NodeId, max_width: f32, fonts: &dyn FontProvider) {
    let Some(node) = tree.get_mut(id) else {
        return;
    };
    match node.font.and_then(|f| fonts.metrics(f).map(|m| (f, m))) {
        Some((font, metrics)) => {
            node.lines = wrap_text(fonts, font, &node.text, max_width);
            node.line_height = metrics.line_height;
        }
        None => {
            node.lines.clear();
            node.line_height = 0.0;
        }
    }
}

/// Re-wrap an auto-height text node at its current width and grow or shrink
/// its height to the wrapped block.
fn fit_text_height(tree: &mut NodeTree, id: NodeId, fonts: &dyn FontProvider) {
    let Some(node) = tree.get(id) else {
        return;
    };
    if node.kind != NodeKind::Text || !node.style.height.is_auto() {
        return;
    }
    let width = (node.bounds.width - node.style.padding.horizontal()).max(0.0);
    rewrap_text(tree, id, width, fonts);
    if let Some(node) = tree.get_mut(id) {
        let block = node.lines.len() as f32 * node.line_height;
        node.bounds.height = node
            .style
            .clamp_height(block + node.style.padding.vertical());
    }
}

/// Intrinsic content size of a stack: summed outer sizes plus gaps on the
/// main axis, the largest outer size on the cross axis.
fn stack_extent(tree: &NodeTree, children: &[NodeId], horizontal: bool, spacing: f32) -> (f32, f32) {
    let mut main = spacing * children.len().saturating_sub(1) as f32;
    let mut cross: f32 = 0.0;
    for c in children.iter().filter_map(|&id| tree.get(id)) {
        main += main_outer(c, horizontal);
        cross = cross.max(if horizontal {
            c.outer_height()
        } else {
            c.outer_width()
        });
    }
    if horizontal {
        (main, cross)
    } else {
        (cross, main)
    }
}

fn main_outer(node: &Node, horizontal: bool) -> f32 {
    if horizontal {
        node.outer_width()
    } else {
        node.outer_height()
    }
}

fn resolve_percentages(node: &mut Node, parent_content: Size) {
    if node.style.width.is_percent() {
        if let Some(w) = node.style.width.resolve(Some(parent_content.width)) {
            node.bounds.width = node.style.clamp_width(w);
        }
    }
    if node.style.height.is_percent() {
        if let Some(h) = node.style.height.resolve(Some(parent_content.height)) {
            node.bounds.height = node.style.clamp_height(h);
        }
    }
}

fn align_cross(
    align: Align,
    start: f32,
    avail: f32,
    size: f32,
    margin_start: f32,
    margin_end: f32,
) -> f32 {
    match align {
        Align::Start | Align::Stretch => start + margin_start,
        Align::Center => start + (avail - size) / 2.0,
        Align::End => start + avail - size - margin_end,
    }
}
