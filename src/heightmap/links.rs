//! Chains of stamps joining nearby bumps of the same spec.

use glam::IVec2;

use super::config::{BumpSpec, LinkPairs};
use super::stamp::{CircleStamp, HeightField};

/// Number of chain stamps per link: t = 0.1, 0.125, ..., 0.975.
pub const LINK_STEPS: usize = 36;
const LINK_START: f32 = 0.1;
const LINK_STEP: f32 = 0.025;

/// Pairs `(i, j)` of bumps whose centers are closer than the spec's
/// `max_link_distance`, in scan order.
pub fn link_pairs(bumps: &[CircleStamp], spec: &BumpSpec) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();

    for (i, a) in bumps.iter().enumerate() {
        for (j, b) in bumps.iter().enumerate() {
            let wanted = match spec.link_pairs {
                LinkPairs::Ordered => i != j,
                LinkPairs::Unordered => i < j,
            };
            if wanted && a.center.as_vec2().distance(b.center.as_vec2()) < spec.max_link_distance {
                pairs.push((i, j));
            }
        }
    }

    pairs
}

/// Centers of the chain stamps along the segment from `start` to `target`,
/// truncated toward zero onto the grid.
pub fn chain_centers(start: IVec2, target: IVec2) -> impl Iterator<Item = IVec2> {
    let origin = start.as_vec2();
    let step = (target - start).as_vec2();
    (0..LINK_STEPS).map(move |k| {
        let t = LINK_START + k as f32 * LINK_STEP;
        (origin + step * t).as_ivec2()
    })
}

impl HeightField {
    /// Draws a chain for every qualifying pair, returning the number of
    /// chains drawn.
    ///
    /// Chain circles use the spec's max height as radius and `-min` as
    /// amplitude with a fixed multiplier of -1, whatever the spec direction.
    pub fn stamp_links(&mut self, bumps: &[CircleStamp], spec: &BumpSpec) -> usize {
        let pairs = link_pairs(bumps, spec);
        let radius = spec.height_range.max;
        let amplitude = -(spec.height_range.min as f32);

        for &(i, j) in &pairs {
            for center in chain_centers(bumps[i].center, bumps[j].center) {
                self.stamp(CircleStamp::new(center, radius), amplitude, -1.0);
            }
        }

        pairs.len()
    }
}
