//! Draw command generation for the Vulpis UI engine.
//!
//! This crate turns a laid-out node tree into a backend-agnostic
//! [`RenderCommandList`] and defines the [`Renderer`] contract that backends
//! implement. [`RecordingRenderer`] is a headless backend that keeps every
//! frame it receives.

pub mod command;
pub mod generate;
pub mod renderer;

pub use command::{RenderCommand, RenderCommandList};
pub use generate::CommandGenerator;
pub use renderer::{RecordingRenderer, Renderer};
