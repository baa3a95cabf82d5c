//! Merges heights, colors and triangles into one mesh artifact.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use thiserror::Error;

use crate::color::Color;
use crate::grid::TerrainGrid;

/// Errors raised when assembler inputs disagree with the grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("Expected {expected} {what}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Triangle index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Interleaved vertex layout for GPU upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// A finished terrain mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    grid: TerrainGrid,
    /// Vertex positions `(x, height, z) * scale`, in grid index order.
    pub positions: Vec<Vec3>,
    /// One color per vertex.
    pub colors: Vec<Color>,
    /// Triangle list, stride 3.
    pub indices: Vec<u32>,
    /// Unscaled synthesized heights.
    pub heights: Vec<f32>,
}

impl TerrainMesh {
    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Height at a grid vertex.
    pub fn height(&self, x: u32, z: u32) -> f32 {
        self.heights[self.grid.index(x, z)]
    }

    /// Computes the min and max height.
    pub fn height_range(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::MAX, f32::MIN), |(min, max), &h| (min.min(h), max.max(h)))
    }

    /// Positions and colors zipped into one vertex buffer.
    pub fn interleaved_vertices(&self) -> Vec<TerrainVertex> {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(|(p, c)| TerrainVertex {
                position: p.to_array(),
                color: [c.r, c.g, c.b, c.a],
            })
            .collect()
    }

    /// Raw bytes of the index buffer.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Applies heights to the flat grid and bundles everything into a mesh.
pub fn assemble_mesh(
    grid: &TerrainGrid,
    scale: f32,
    heights: Vec<f32>,
    colors: Vec<Color>,
    indices: Vec<u32>,
) -> Result<TerrainMesh, MeshError> {
    let vertex_count = grid.vertex_count();
    check_len("heights", vertex_count, heights.len())?;
    check_len("colors", vertex_count, colors.len())?;
    if indices.len() % 3 != 0 {
        return Err(MeshError::LengthMismatch {
            what: "indices (multiple of 3)",
            expected: indices.len() / 3 * 3,
            actual: indices.len(),
        });
    }
    if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(MeshError::IndexOutOfRange { index, vertex_count });
    }

    let positions = grid
        .vertices()
        .into_iter()
        .zip(&heights)
        .map(|(v, &h)| (v + Vec3::Y * h) * scale)
        .collect();

    Ok(TerrainMesh {
        grid: *grid,
        positions,
        colors,
        indices,
        heights,
    })
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), MeshError> {
    if expected != actual {
        return Err(MeshError::LengthMismatch { what, expected, actual });
    }
    Ok(())
}
