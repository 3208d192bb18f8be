//! Error types for the Vulpis engine.
//!
//! Building, reconciling, laying out and painting the tree never fail: bad
//! description fields fall back to defaults. Errors only come from the
//! collaborators around the core (host, callbacks, renderer, config files).

use thiserror::Error;

/// Top-level error type for the Vulpis engine.
#[derive(Debug, Error)]
pub enum VulpisError {
    #[error(transparent)]
    Description(#[from] DescriptionError),

    #[error(transparent)]
    Callback(#[from] CallbackError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors while loading a description from an external format.
#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("Invalid description JSON: {reason}")]
    InvalidJson { reason: String },
}

/// A click handler failed while running user code.
#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("Handler failed: {reason}")]
    Failed { reason: String },
}

impl CallbackError {
    pub fn failed(reason: impl Into<String>) -> Self {
        CallbackError::Failed {
            reason: reason.into(),
        }
    }
}

/// The scripting host could not produce a description.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Description generator failed: {reason}")]
    GeneratorFailed { reason: String },
}

/// Errors reported by a renderer backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Renderer is not inside a frame")]
    NoActiveFrame,

    #[error("Frame already started")]
    FrameInProgress,

    #[error("Backend error: {reason}")]
    Backend { reason: String },
}

/// Errors while reading runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },

    #[error("Unknown window mode: {mode}")]
    UnknownWindowMode { mode: String },
}
