//! Grid configuration.

use serde::{Deserialize, Serialize};

use super::layout::{GridError, TerrainGrid};

/// Dimensions of the terrain grid, in cells.
///
/// A grid of `width` × `depth` cells has `(width + 1) * (depth + 1)` vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of cells along X.
    pub width: u32,
    /// Number of cells along Z.
    pub depth: u32,
    /// Uniform scale applied to final vertex positions.
    pub scale: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 200,
            depth: 200,
            scale: 1.0,
        }
    }
}

impl GridConfig {
    /// Creates a square grid with unit scale.
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            depth: size,
            scale: 1.0,
        }
    }

    /// Validates the dimensions and scale and builds the grid topology.
    pub fn build(&self) -> Result<TerrainGrid, GridError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(GridError::InvalidScale(self.scale));
        }
        TerrainGrid::new(self.width, self.depth)
    }
}
