//! Rectangular terrain grid module.
//!
//! Provides the dense vertex lattice the heightmap is synthesized on, and the
//! clamping coordinate-to-index projection every stamp goes through.

mod config;
mod layout;

pub use config::GridConfig;
pub use layout::{GridError, TerrainGrid};
