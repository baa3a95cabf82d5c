//! Maps final heights to vertex colors.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::gradient::{Color, Gradient, GradientError};

/// Height levels the gradient is stretched between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Heights at or below this map to the start of the gradient.
    pub water_level: f32,
    /// Heights at or above this map to the end of the gradient.
    pub peak_level: f32,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            water_level: -1.0,
            peak_level: 30.0,
        }
    }
}

impl ColorConfig {
    pub fn validate(&self) -> Result<(), GradientError> {
        let (water, peak) = (self.water_level, self.peak_level);
        if !water.is_finite() || !peak.is_finite() || water == peak {
            return Err(GradientError::DegenerateLevels { water, peak });
        }
        Ok(())
    }
}

/// Position of `height` between water and peak level, clamped to `[0, 1]`.
///
/// Equal levels give 0 rather than dividing by zero.
pub fn normalized_height(height: f32, water_level: f32, peak_level: f32) -> f32 {
    let range = peak_level - water_level;
    if range == 0.0 {
        return 0.0;
    }
    ((height - water_level) / range).clamp(0.0, 1.0)
}

/// One color per height.
pub fn map_colors(heights: &[f32], config: &ColorConfig, gradient: &Gradient) -> Vec<Color> {
    heights
        .par_iter()
        .map(|&h| gradient.evaluate(normalized_height(h, config.water_level, config.peak_level)))
        .collect()
}
