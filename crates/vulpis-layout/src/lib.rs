//! Layout computation for the Vulpis node tree.
//!
//! This crate computes the final positions and sizes of nodes from their
//! resolved styles.
//!
//! # Architecture
//!
//! 1. **Measure**: post-order pass assigning requested or intrinsic sizes
//! 2. **Compute**: pre-order pass resolving percentages, flex growth,
//!    justification and alignment into absolute positions
//! 3. **Text**: greedy word wrapping against a [`FontProvider`]
//!
//! # Example
//!
//! ```ignore
//! use vulpis_layout::{FlowLayout, LayoutOptions, LayoutSolver};
//!
//! let mut solver = FlowLayout::new();
//! solver.solve(&mut tree, &LayoutOptions::default(), &fonts);
//! ```

pub mod flex;
mod flow;
pub mod text;

pub use flex::{distribute_flex, justify_spacing};
pub use flow::FlowLayout;
pub use text::{block_width, wrap_text};

use vulpis_core::{FontProvider, Size};
use vulpis_tree::NodeTree;

/// Options for layout computation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    /// Viewport width in pixels
    pub viewport_width: f32,
    /// Viewport height in pixels
    pub viewport_height: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
        }
    }
}

impl LayoutOptions {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
        }
    }

    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }
}

/// Assigns final geometry to every node of a tree.
///
/// Implementations lay out the whole tree on every call; there is no
/// partial relayout.
pub trait LayoutSolver {
    fn solve(&mut self, tree: &mut NodeTree, options: &LayoutOptions, fonts: &dyn FontProvider);
}
