//! Frame loop for the Vulpis UI engine.
//!
//! A [`Runtime`] owns the node tree and state store and ties together the
//! pieces from the other crates:
//!
//! - a [`Host`] renders the state into a description
//! - the reconciler patches the tree to match it
//! - a layout solver positions the tree when it is layout-dirty
//! - the command generator paints it into a [`Renderer`]
//!
//! Input arrives as [`InputEvent`]s; clicks run the handler of the node under
//! the pointer, and handlers mutate state which triggers the next re-render.

pub mod config;
pub mod host;
pub mod input;
mod runtime;

pub use config::{RuntimeConfig, WindowConfig, WindowMode};
pub use host::Host;
pub use input::{dispatch_click, ClickOutcome, InputEvent};
pub use runtime::{FrameReport, Runtime};
