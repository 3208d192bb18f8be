//! The materialized node tree of the Vulpis UI engine.
//!
//! This crate owns the retained tree between frames:
//! - [`NodeTree`]: an arena of [`Node`]s addressed by stable [`NodeId`]s
//! - [`TreeBuilder`]: builds fresh subtrees from descriptions
//! - [`Reconciler`]: patches the existing tree in place, preserving identity

pub mod builder;
pub mod node;
pub mod reconcile;
pub mod style;
pub mod tree;

pub use builder::TreeBuilder;
pub use node::{Align, Justify, Node, NodeId, NodeKind, NodeStyle, TextLine};
pub use reconcile::{ReconcileReport, Reconciler};
pub use style::{parse_color, resolve_style, StyleReader};
pub use tree::{Descendants, NodeTree};
