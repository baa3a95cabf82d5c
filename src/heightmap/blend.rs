//! Height-weighted coherent noise blend.

use rayon::prelude::*;

use crate::noise::CoherentNoise;
use super::config::NoiseBlendConfig;
use super::stamp::HeightField;

impl HeightField {
    /// Adds noise to every vertex at or above `begin_height`.
    ///
    /// The contribution is `noise * power * clamp(h / end_height, 0, 1)`, so
    /// low ground stays smooth and high ground gets full roughness. Vertices
    /// are independent, so this pass runs in parallel without changing the
    /// result.
    pub fn blend_noise<N: CoherentNoise + ?Sized>(&mut self, config: &NoiseBlendConfig, noise: &N) {
        let grid = *self.grid();
        let clamp = self.clamp();

        self.heights_mut()
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, height)| {
                if *height < config.begin_height {
                    return;
                }
                let (x, z) = grid.coord(i);
                let multiplier = (*height / config.end_height).clamp(0.0, 1.0);
                let sample = noise.sample(x as f32 / config.refinement, z as f32 / config.refinement);
                *height = clamp.apply(*height + sample * config.power * multiplier);
            });
    }
}
