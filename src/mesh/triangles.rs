//! Grid triangulation.

use crate::grid::TerrainGrid;

/// Number of triangles covering the grid, two per cell.
pub fn triangle_count(grid: &TerrainGrid) -> usize {
    grid.width() as usize * grid.depth() as usize * 2
}

/// Triangle-list indices for the grid, independent of heights.
///
/// For the cell whose lower corner is vertex `v`:
/// tri1: `v -> v + w + 1 -> v + 1`
/// tri2: `v + 1 -> v + w + 1 -> v + w + 2`
/// (CCW viewed from +Y in a left-handed, Y-up frame)
pub fn build_triangles(grid: &TerrainGrid) -> Vec<u32> {
    let w = grid.width();
    let mut indices = Vec::with_capacity(triangle_count(grid) * 3);

    for z in 0..grid.depth() {
        for x in 0..w {
            let v = z * (w + 1) + x;
            indices.extend_from_slice(&[
                v,
                v + w + 1,
                v + 1,
                v + 1,
                v + w + 1,
                v + w + 2,
            ]);
        }
    }

    indices
}
