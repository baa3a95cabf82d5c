//! Coherent noise used to roughen synthesized terrain.
//!
//! Uses simdnoise for the default fractal implementation; any pure
//! `Fn(f32, f32) -> f32` can stand in for it.

mod coherent;
mod fractal;

pub use coherent::{CoherentNoise, FractalNoise2d};
pub use fractal::{FractalNoiseConfig, sample_fractal_noise};
