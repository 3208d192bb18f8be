//! The scripting host contract.

use vulpis_core::{Description, HostError, StateStore, VulpisError};

/// Produces descriptions and receives errors the frame loop does not
/// propagate.
pub trait Host {
    /// Render the current state into a fresh description.
    fn render(&mut self, state: &mut StateStore) -> Result<Description, HostError>;

    /// Error channel for failures that must not abort the frame.
    fn report_error(&mut self, error: &VulpisError) {
        tracing::error!(%error, "host error");
    }
}

impl<F> Host for F
where
    F: FnMut(&mut StateStore) -> Result<Description, HostError>,
{
    fn render(&mut self, state: &mut StateStore) -> Result<Description, HostError> {
        self(state)
    }
}
