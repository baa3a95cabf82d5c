//! Procedural terrain mesh generator.
//!
//! Heights are built by stamping circular bumps onto a rectangular vertex
//! grid, optionally linking nearby bumps with carved chains, and blending in
//! coherent noise. The result is colored by height and triangulated into a
//! renderable mesh.

pub mod color;
pub mod details;
pub mod export;
pub mod grid;
pub mod heightmap;
pub mod mesh;
pub mod noise;
pub mod pipeline;
pub mod terrain;

pub use color::{Color, ColorConfig, Gradient};
pub use grid::{GridConfig, TerrainGrid};
pub use heightmap::{BumpSpec, HeightRange, HeightmapConfig, synthesize};
pub use mesh::{TerrainMesh, TerrainVertex};
pub use noise::{CoherentNoise, FractalNoiseConfig};
pub use pipeline::{GenerationStage, Pipeline};
pub use terrain::{TerrainConfig, TerrainError, TerrainGenerator};
