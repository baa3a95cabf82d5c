//! Terrain generation module.
//!
//! Ties the grid, synthesis, coloring and triangulation together behind an
//! explicit initialize/generate lifecycle.

mod build;
mod config;
mod generator;

pub use build::TerrainBuild;
pub use config::TerrainConfig;
pub use generator::{TerrainError, TerrainGenerator};
