//! Materialized tree nodes.
//!
//! A node carries the resolved style read from its description, the geometry
//! written by the layout solver, and the two dirty flags that drive the
//! frame loop.

use smallvec::SmallVec;
use vulpis_core::{Bounds, Color, Edges, FontId, HandlerRef, Length, UNBOUNDED};

/// Stable handle of a node in a [`NodeTree`](crate::NodeTree). Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// The closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Horizontal stack
    Row,
    /// Vertical stack
    Column,
    /// Plain box; stacks its children vertically
    #[default]
    Rectangle,
    /// Wrapped text block
    Text,
}

impl NodeKind {
    /// Map a description tag onto a kind. Unknown tags become rectangles.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "hstack" | "row" => NodeKind::Row,
            "vstack" | "column" | "col" => NodeKind::Column,
            "text" => NodeKind::Text,
            _ => NodeKind::Rectangle,
        }
    }

    /// Whether children flow along the x axis.
    pub fn is_horizontal(self) -> bool {
        match self {
            NodeKind::Row => true,
            NodeKind::Column | NodeKind::Rectangle | NodeKind::Text => false,
        }
    }
}

/// Cross-axis alignment of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    Stretch,
}

impl Align {
    pub fn parse(s: &str) -> Self {
        match s {
            "center" => Align::Center,
            "end" => Align::End,
            "stretch" => Align::Stretch,
            _ => Align::Start,
        }
    }
}

/// Main-axis distribution of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl Justify {
    pub fn parse(s: &str) -> Self {
        match s {
            "end" => Justify::End,
            "center" => Justify::Center,
            "space-between" => Justify::SpaceBetween,
            "space-around" => Justify::SpaceAround,
            "space-evenly" => Justify::SpaceEvenly,
            _ => Justify::Start,
        }
    }
}

/// Style fields resolved from a description, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub width: Length,
    pub height: Length,
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub padding: Edges,
    pub margin: Edges,
    /// Gap between children along the main axis
    pub spacing: f32,
    pub flex_grow: f32,
    pub align_items: Align,
    pub justify_content: Justify,
    /// Background fill, if any
    pub background: Option<Color>,
    /// Clip children to this node's box
    pub overflow_hidden: bool,
    pub text_color: Color,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            width: Length::Auto,
            height: Length::Auto,
            min_width: 0.0,
            max_width: UNBOUNDED,
            min_height: 0.0,
            max_height: UNBOUNDED,
            padding: Edges::default(),
            margin: Edges::default(),
            spacing: 0.0,
            flex_grow: 0.0,
            align_items: Align::Start,
            justify_content: Justify::Start,
            background: None,
            overflow_hidden: true,
            text_color: Color::WHITE,
        }
    }
}

impl NodeStyle {
    /// Clamp a width into `[min_width, max_width]`, never negative.
    pub fn clamp_width(&self, width: f32) -> f32 {
        width.min(self.max_width).max(self.min_width).max(0.0)
    }

    /// Clamp a height into `[min_height, max_height]`, never negative.
    pub fn clamp_height(&self, height: f32) -> f32 {
        height.min(self.max_height).max(self.min_height).max(0.0)
    }
}

/// One wrapped line of a text node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLine {
    pub text: String,
    pub width: f32,
}

/// A node in the materialized tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Identity among siblings
    pub key: Option<String>,
    /// Non-owning back reference
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
    pub style: NodeStyle,
    pub text: String,
    pub font: Option<FontId>,
    /// Wrapped lines from the last layout
    pub lines: Vec<TextLine>,
    pub line_height: f32,
    pub on_click: Option<HandlerRef>,
    /// Absolute position and size from the last layout
    pub bounds: Bounds,
    pub layout_dirty: bool,
    pub paint_dirty: bool,
}

impl Node {
    /// A fresh node. New nodes start dirty on both flags.
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            key: None,
            parent: None,
            children: SmallVec::new(),
            style: NodeStyle::default(),
            text: String::new(),
            font: None,
            lines: Vec::new(),
            line_height: 0.0,
            on_click: None,
            bounds: Bounds::default(),
            layout_dirty: true,
            paint_dirty: true,
        }
    }

    /// Box inside the padding.
    pub fn content_box(&self) -> Bounds {
        self.bounds.inset(&self.style.padding)
    }

    /// Width including horizontal margins.
    pub fn outer_width(&self) -> f32 {
        self.bounds.width + self.style.margin.horizontal()
    }

    /// Height including vertical margins.
    pub fn outer_height(&self) -> f32 {
        self.bounds.height + self.style.margin.vertical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(NodeKind::from_tag("hstack"), NodeKind::Row);
        assert_eq!(NodeKind::from_tag("col"), NodeKind::Column);
        assert_eq!(NodeKind::from_tag("text"), NodeKind::Text);
        assert_eq!(NodeKind::from_tag("rect"), NodeKind::Rectangle);
        assert_eq!(NodeKind::from_tag("whatever"), NodeKind::Rectangle);
        assert!(NodeKind::Row.is_horizontal());
        assert!(!NodeKind::Text.is_horizontal());
    }

    #[test]
    fn test_style_defaults() {
        let style = NodeStyle::default();
        assert!(style.overflow_hidden);
        assert_eq!(style.max_width, UNBOUNDED);
        assert_eq!(style.align_items, Align::Start);
        assert_eq!(Justify::parse("bogus"), Justify::Start);
    }

    #[test]
    fn test_clamp() {
        let style = NodeStyle {
            min_width: 10.0,
            max_width: 50.0,
            ..Default::default()
        };
        assert!((style.clamp_width(5.0) - 10.0).abs() < 0.001);
        assert!((style.clamp_width(80.0) - 50.0).abs() < 0.001);
        assert!((style.clamp_height(-3.0)).abs() < 0.001);
    }

    #[test]
    fn test_content_box_and_outer_size() {
        let mut node = Node::new(NodeId(0), NodeKind::Column);
        node.bounds = Bounds::new(10.0, 10.0, 100.0, 40.0);
        node.style.padding = Edges::uniform(5.0);
        node.style.margin = Edges {
            left: 3.0,
            right: 2.0,
            ..Default::default()
        };

        let content = node.content_box();
        assert!((content.x - 15.0).abs() < 0.001);
        assert!((content.width - 90.0).abs() < 0.001);
        assert!((node.outer_width() - 105.0).abs() < 0.001);
        assert!((node.outer_height() - 40.0).abs() < 0.001);
    }
}
