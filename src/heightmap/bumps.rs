//! Randomized bump placement.

use std::ops::Range;

use glam::IVec2;
use rand::Rng;

use crate::grid::TerrainGrid;
use super::config::BumpSpec;
use super::stamp::{CircleStamp, HeightField};
use super::synthesis::SynthesisError;

/// Half-open bounds of the offset added to a spec's base radius.
fn radius_offset_bounds(max: i32) -> (i32, i32) {
    (-max / 2, max + max / 4)
}

/// Largest radius a spec with base radius `max` can draw.
pub fn largest_radius(max: i32) -> i32 {
    let (low, high) = radius_offset_bounds(max);
    if low < high { max + high - 1 } else { max + low }
}

/// Center ranges that keep a circle of `radius` inside the grid with a
/// one-cell margin: x in `[r + 1, width - r - 1)`, z in `[r, depth - r - 1)`.
pub fn placement_ranges(
    grid: &TerrainGrid,
    radius: i32,
    spec: usize,
) -> Result<(Range<i32>, Range<i32>), SynthesisError> {
    let x = (radius + 1)..(grid.width() as i32 - radius - 1);
    let z = radius..(grid.depth() as i32 - radius - 1);

    for (axis, range) in [("x", &x), ("z", &z)] {
        if range.is_empty() {
            return Err(SynthesisError::EmptyPlacementRange {
                spec,
                axis,
                low: range.start,
                high: range.end,
                radius,
            });
        }
    }

    Ok((x, z))
}

fn draw_radius<R: Rng + ?Sized>(rng: &mut R, max: i32) -> i32 {
    let (low, high) = radius_offset_bounds(max);
    let offset = if low < high { rng.random_range(low..high) } else { low };
    max + offset
}

impl HeightField {
    /// Places and stamps `spec.count` bumps, returning their circles in
    /// placement order.
    ///
    /// Each bump uses its radius as amplitude and the spec direction as
    /// multiplier.
    pub fn stamp_bumps<R: Rng + ?Sized>(
        &mut self,
        spec_index: usize,
        spec: &BumpSpec,
        rng: &mut R,
    ) -> Result<Vec<CircleStamp>, SynthesisError> {
        let mut circles = Vec::with_capacity(spec.count as usize);

        for _ in 0..spec.count {
            let radius = draw_radius(rng, spec.height_range.max);
            let (xs, zs) = placement_ranges(self.grid(), radius, spec_index)?;
            let center = IVec2::new(rng.random_range(xs), rng.random_range(zs));

            let circle = CircleStamp::new(center, radius);
            self.stamp(circle, radius as f32, spec.direction);
            circles.push(circle);
        }

        Ok(circles)
    }
}
