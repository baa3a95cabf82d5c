//! Buffer a single generation pass writes into.

use crate::grid::TerrainGrid;
use crate::color::Color;

/// Work-in-progress terrain data for one generation pass.
///
/// Every pass starts from a fresh build; stages fill in the optional fields.
#[derive(Debug, Clone)]
pub struct TerrainBuild {
    pub grid: TerrainGrid,
    /// Synthesized heights (populated by the heightmap stage).
    pub heights: Option<Vec<f32>>,
    /// Per-vertex colors (populated by the color stage).
    pub colors: Option<Vec<Color>>,
    /// Triangle list (populated by the triangle stage).
    pub indices: Option<Vec<u32>>,
}

impl TerrainBuild {
    pub fn new(grid: TerrainGrid) -> Self {
        Self {
            grid,
            heights: None,
            colors: None,
            indices: None,
        }
    }

    /// Returns true once heights, colors and triangles are all present.
    pub fn is_complete(&self) -> bool {
        self.heights.is_some() && self.colors.is_some() && self.indices.is_some()
    }
}
