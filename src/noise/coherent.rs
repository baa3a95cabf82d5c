//! The coherent-noise seam the height synthesizer samples through.

use super::fractal::{FractalNoiseConfig, sample_fractal_noise};

/// A deterministic 2D noise field with values in `[0, 1]`.
///
/// Implementations must be pure functions of `(x, z)`: sampling the same
/// point twice returns the same value, so synthesis stays reproducible.
pub trait CoherentNoise: Send + Sync {
    fn sample(&self, x: f32, z: f32) -> f32;
}

impl<F> CoherentNoise for F
where
    F: Fn(f32, f32) -> f32 + Send + Sync,
{
    fn sample(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// Fractal noise remapped from `[-1, 1]` into `[0, 1]`.
#[derive(Debug, Clone, Default)]
pub struct FractalNoise2d {
    pub config: FractalNoiseConfig,
}

impl FractalNoise2d {
    pub fn new(config: FractalNoiseConfig) -> Self {
        Self { config }
    }
}

impl CoherentNoise for FractalNoise2d {
    fn sample(&self, x: f32, z: f32) -> f32 {
        let value = sample_fractal_noise(x, z, &self.config);
        (value * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}
