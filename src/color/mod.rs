//! Height-based vertex coloring.
//!
//! Heights are normalized between the water and peak levels and looked up in
//! an ordered color gradient.

mod gradient;
mod mapper;

pub use gradient::{Color, Gradient, GradientError, GradientStop};
pub use mapper::{ColorConfig, map_colors, normalized_height};
