//! Export module for saving generated terrain as preview images.
//!
//! Heights go out as 16-bit grayscale PNG, vertex colors as 8-bit RGBA.

mod png;

pub use png::{export_color_map_png, export_heightmap_png, PngExportError, PngExportOptions};
