//! Heightmap synthesis.
//!
//! Stamps radial bumps onto a shared height field, chains same-type bumps into
//! ridges and channels, then roughens the raised ground with coherent noise.
//! Every contribution is clamped as soon as it lands, so stamp order matters.

mod blend;
mod bumps;
mod config;
mod links;
mod stamp;
mod synthesis;

pub use bumps::{largest_radius, placement_ranges};
pub use config::{BumpSpec, HeightClamp, HeightRange, HeightmapConfig, LinkPairs, NoiseBlendConfig};
pub use links::{LINK_STEPS, chain_centers, link_pairs};
pub use stamp::{CircleStamp, HeightField, MirrorSet};
pub use synthesis::{SynthesisError, synthesize};
