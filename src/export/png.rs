//! PNG export for heightmaps and vertex color maps.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma, Rgba};
use thiserror::Error;
use tracing::debug;

use crate::mesh::TerrainMesh;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid height range: min ({0}) >= max ({1})")]
    InvalidHeightRange(f32, f32),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Height written as black.
    pub min_height: f32,
    /// Height written as white.
    pub max_height: f32,
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            min_height: -15.0,
            max_height: 50.0,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Creates options spanning the mesh's actual height range.
    pub fn auto_range(mesh: &TerrainMesh) -> Self {
        let (min, max) = mesh.height_range();
        Self {
            min_height: min,
            max_height: max,
            ..Default::default()
        }
    }
}

fn image_size(mesh: &TerrainMesh) -> (u32, u32) {
    let grid = mesh.grid();
    (grid.width() + 1, grid.depth() + 1)
}

fn encoder(path: &Path, options: &PngExportOptions) -> Result<PngEncoder<BufWriter<File>>, PngExportError> {
    let writer = BufWriter::new(File::create(path)?);
    Ok(PngEncoder::new_with_quality(writer, options.compression, options.filter))
}

/// Exports mesh heights as a 16-bit grayscale PNG, one pixel per vertex.
///
/// Pixel `(x, z)` holds the height at grid vertex `(x, z)`, normalized into
/// `[min_height, max_height]`.
pub fn export_heightmap_png(
    mesh: &TerrainMesh,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let min = options.min_height;
    let max = options.max_height;

    if min.is_nan() || max.is_nan() || min >= max {
        return Err(PngExportError::InvalidHeightRange(min, max));
    }

    let (width, height) = image_size(mesh);
    let range = max - min;

    let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_fn(width, height, |x, z| {
        let normalized = ((mesh.height(x, z) - min) / range).clamp(0.0, 1.0);
        Luma([(normalized * 65535.0) as u16])
    });

    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder(path, options)?.write_image(byte_slice, width, height, image::ExtendedColorType::L16)?;

    debug!(path = %path.display(), width, height, "exported heightmap png");
    Ok(())
}

/// Exports mesh vertex colors as an 8-bit RGBA PNG.
pub fn export_color_map_png(mesh: &TerrainMesh, path: &Path) -> Result<(), PngExportError> {
    let (width, height) = image_size(mesh);
    let grid = *mesh.grid();

    let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, z| {
        Rgba(mesh.colors[grid.index(x, z)].to_rgba8())
    });

    encoder(path, &PngExportOptions::default())?.write_image(
        img.as_raw(),
        width,
        height,
        image::ExtendedColorType::Rgba8,
    )?;

    debug!(path = %path.display(), width, height, "exported color map png");
    Ok(())
}
