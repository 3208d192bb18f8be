//! Input events and click dispatch.

use glam::Vec2;
use vulpis_core::{CallbackError, StateStore};
use vulpis_tree::{NodeId, NodeTree};

/// Events the frame loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button press in window coordinates
    Click { x: f32, y: f32 },
    /// The window was resized
    Resize { width: f32, height: f32 },
    /// The user asked to close the window
    Quit,
}

/// Result of dispatching a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing under the point, or no handler on the path to the root
    Unhandled,
    /// The handler of this node ran
    Handled(NodeId),
}

/// Run the click handler for the node under `point`.
///
/// The deepest node under the point is found first; the click then bubbles
/// through its ancestors to the first node holding a handler.
pub fn dispatch_click(
    tree: &NodeTree,
    state: &mut StateStore,
    point: Vec2,
) -> Result<ClickOutcome, CallbackError> {
    let mut current = tree.hit_test(point);
    while let Some(id) = current {
        let Some(node) = tree.get(id) else {
            break;
        };
        if let Some(handler) = &node.on_click {
            tracing::debug!(node = id.0, "dispatching click");
            handler.call(state)?;
            return Ok(ClickOutcome::Handled(id));
        }
        current = node.parent;
    }
    Ok(ClickOutcome::Unhandled)
}
