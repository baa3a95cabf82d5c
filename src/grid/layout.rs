//! Dense vertex lattice with clamp-on-lookup indexing.

use glam::{IVec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Grid must have at least one cell in each direction, got {width}x{depth}")]
    ZeroSize { width: u32, depth: u32 },
    #[error("Grid scale must be finite and positive, got {0}")]
    InvalidScale(f32),
    #[error("Grid {width}x{depth} has more vertices than a u32 index can address")]
    TooLarge { width: u32, depth: u32 },
}

/// Topology of a `width` × `depth` cell grid lying in the XZ plane.
///
/// Vertices are stored row-major along X: the vertex at `(x, z)` has index
/// `z * (width + 1) + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridDims")]
pub struct TerrainGrid {
    width: u32,
    depth: u32,
}

#[derive(Deserialize)]
struct GridDims {
    width: u32,
    depth: u32,
}

impl TryFrom<GridDims> for TerrainGrid {
    type Error = GridError;

    fn try_from(dims: GridDims) -> Result<Self, Self::Error> {
        TerrainGrid::new(dims.width, dims.depth)
    }
}

impl TerrainGrid {
    /// Creates a grid, rejecting zero-sized dimensions and grids whose
    /// vertices cannot all be addressed by a `u32` index.
    pub fn new(width: u32, depth: u32) -> Result<Self, GridError> {
        if width == 0 || depth == 0 {
            return Err(GridError::ZeroSize { width, depth });
        }
        let vertices = (u64::from(width) + 1) * (u64::from(depth) + 1);
        if vertices > u64::from(u32::MAX) {
            return Err(GridError::TooLarge { width, depth });
        }
        Ok(Self { width, depth })
    }

    /// Number of cells along X.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of cells along Z.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of vertices along X (one more than the cell count).
    pub fn row_len(&self) -> usize {
        self.width as usize + 1
    }

    /// Total vertex count, `(width + 1) * (depth + 1)`.
    pub fn vertex_count(&self) -> usize {
        self.row_len() * (self.depth as usize + 1)
    }

    /// Index of an in-range vertex.
    pub fn index(&self, x: u32, z: u32) -> usize {
        debug_assert!(x <= self.width && z <= self.depth);
        z as usize * self.row_len() + x as usize
    }

    /// Index of the vertex nearest to `point` after clamping it into
    /// `[(0, 0), (width, depth)]`.
    ///
    /// Never rejects and never wraps: anything outside the grid projects onto
    /// the boundary row or column.
    pub fn clamped_index(&self, point: IVec2) -> usize {
        let x = point.x.clamp(0, self.width as i32) as u32;
        let z = point.y.clamp(0, self.depth as i32) as u32;
        self.index(x, z)
    }

    /// Grid coordinate `(x, z)` of a vertex index.
    pub fn coord(&self, index: usize) -> (u32, u32) {
        debug_assert!(index < self.vertex_count());
        let row = self.row_len();
        ((index % row) as u32, (index / row) as u32)
    }

    /// Iterates `(x, z)` over all vertices in index order.
    pub fn coords(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let (w, d) = (self.width, self.depth);
        (0..=d).flat_map(move |z| (0..=w).map(move |x| (x, z)))
    }

    /// Flat vertex positions `(x, 0, z)` in index order.
    pub fn vertices(&self) -> Vec<Vec3> {
        self.coords()
            .map(|(x, z)| Vec3::new(x as f32, 0.0, z as f32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_count() {
        for (w, d) in [(1, 1), (4, 4), (7, 3), (200, 200)] {
            let grid = TerrainGrid::new(w, d).unwrap();
            assert_eq!(grid.vertex_count(), ((w + 1) * (d + 1)) as usize);
            assert_eq!(grid.vertices().len(), grid.vertex_count());
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(
            TerrainGrid::new(0, 4),
            Err(GridError::ZeroSize { width: 0, depth: 4 })
        );
        assert!(TerrainGrid::new(4, 0).is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        assert_eq!(
            TerrainGrid::new(3_000_000_000, 1),
            Err(GridError::TooLarge { width: 3_000_000_000, depth: 1 })
        );
        assert!(TerrainGrid::new(65_535, 65_535).is_err());

        // largest square-ish grid whose vertex indices fit in u32
        let grid = TerrainGrid::new(65_534, 65_535).unwrap();
        let corner = grid.clamped_index(IVec2::new(i32::MAX, i32::MAX));
        assert_eq!(corner, grid.vertex_count() - 1);
        assert!(corner <= u32::MAX as usize);
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<TerrainGrid>(r#"{"width":0,"depth":4}"#).is_err());
        assert!(serde_json::from_str::<TerrainGrid>(r#"{"width":4294967295,"depth":4}"#).is_err());

        let grid: TerrainGrid = serde_json::from_str(r#"{"width":7,"depth":3}"#).unwrap();
        assert_eq!(grid, TerrainGrid::new(7, 3).unwrap());
    }

    #[test]
    fn test_index_is_bijective_on_interior() {
        let grid = TerrainGrid::new(5, 3).unwrap();
        let mut seen = vec![false; grid.vertex_count()];

        for (x, z) in grid.coords() {
            let i = grid.clamped_index(IVec2::new(x as i32, z as i32));
            assert_eq!(i, grid.index(x, z));
            assert_eq!(grid.coord(i), (x, z));
            assert!(!seen[i], "index {} produced twice", i);
            seen[i] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_clamp_outside_grid() {
        let grid = TerrainGrid::new(4, 4).unwrap();

        assert_eq!(grid.clamped_index(IVec2::new(-5, -5)), grid.index(0, 0));
        assert_eq!(grid.clamped_index(IVec2::new(9, 9)), grid.index(4, 4));
        assert_eq!(grid.clamped_index(IVec2::new(-1, 2)), grid.index(0, 2));
        assert_eq!(grid.clamped_index(IVec2::new(2, 17)), grid.index(2, 4));
    }

    #[test]
    fn test_vertex_positions() {
        let grid = TerrainGrid::new(2, 1).unwrap();
        let verts = grid.vertices();

        assert_eq!(verts[0], Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(verts[2], Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(verts[3], Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(verts[5], Vec3::new(2.0, 0.0, 1.0));
    }
}
