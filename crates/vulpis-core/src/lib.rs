//! Core types and host contracts for the Vulpis UI engine.
//!
//! This crate provides the foundational types used across all other vulpis crates:
//! - Value types (colors, lengths, edges, bounds)
//! - The declarative [`Description`] tree produced by the host
//! - The [`FontProvider`] contract and a monospace implementation
//! - Click [`Handler`]s and the [`StateStore`] they mutate
//! - Error types

pub mod description;
pub mod errors;
pub mod font;
pub mod handler;
pub mod state;
pub mod types;

pub use description::*;
pub use errors::*;
pub use font::*;
pub use handler::*;
pub use state::*;
pub use types::*;
