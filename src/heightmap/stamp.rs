//! The circle stamp primitive and the height field it accumulates into.

use glam::IVec2;

use crate::grid::TerrainGrid;
use super::config::HeightClamp;

/// A stamped circle: grid-space center `(x, z)` and integer radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleStamp {
    pub center: IVec2,
    pub radius: i32,
}

impl CircleStamp {
    pub fn new(center: IVec2, radius: i32) -> Self {
        Self { center, radius }
    }
}

/// Up to four distinct vertex indices reached by mirroring one scanned offset
/// into the other quadrants.
///
/// Offsets on an axis mirror onto themselves, and clamped coordinates past the
/// boundary can land on the same vertex, so a set holds between one and four
/// entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorSet {
    slots: [usize; 4],
    len: usize,
}

impl MirrorSet {
    fn insert(&mut self, index: usize) {
        if !self.as_slice().contains(&index) {
            self.slots[self.len] = index;
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.slots[..self.len]
    }
}

/// Heights under construction for one synthesis pass.
///
/// Starts at zero everywhere; every write is clamped into the configured
/// bounds immediately.
#[derive(Debug, Clone)]
pub struct HeightField {
    grid: TerrainGrid,
    clamp: HeightClamp,
    heights: Vec<f32>,
}

impl HeightField {
    pub fn new(grid: TerrainGrid, clamp: HeightClamp) -> Self {
        Self {
            grid,
            clamp,
            heights: vec![0.0; grid.vertex_count()],
        }
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    pub fn clamp(&self) -> HeightClamp {
        self.clamp
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub(crate) fn heights_mut(&mut self) -> &mut [f32] {
        &mut self.heights
    }

    pub fn into_heights(self) -> Vec<f32> {
        self.heights
    }

    /// Height at an in-range vertex.
    pub fn height(&self, x: u32, z: u32) -> f32 {
        self.heights[self.grid.index(x, z)]
    }

    /// Indices hit by offset `(dx, dz)` mirrored around `center`.
    pub fn mirrored_indices(&self, center: IVec2, dx: i32, dz: i32) -> MirrorSet {
        let mut set = MirrorSet::default();
        let near = center + IVec2::new(dx, dz);
        let far = center - IVec2::new(dx, dz);

        set.insert(self.grid.clamped_index(near));
        set.insert(self.grid.clamped_index(far));
        set.insert(self.grid.clamped_index(IVec2::new(near.x, far.y)));
        set.insert(self.grid.clamped_index(IVec2::new(far.x, near.y)));
        set
    }

    /// Stamps a circle with quadratic falloff.
    ///
    /// Each vertex at squared distance `d2` from the center receives
    /// `amplitude * (r² - d2) / r² * multiplier`, then is clamped. Only the
    /// upper-left quadrant is scanned and mirrored; points outside the grid
    /// project onto the boundary and accumulate there.
    pub fn stamp(&mut self, circle: CircleStamp, amplitude: f32, multiplier: f32) {
        let CircleStamp { center, radius } = circle;
        if radius <= 0 {
            return;
        }

        let rad2 = f64::from(radius).powi(2);

        for dx in -radius..=0 {
            for dz in -radius..=0 {
                let location = f64::from(dx).powi(2) + f64::from(dz).powi(2);
                if location > rad2 {
                    continue;
                }

                let falloff = ((rad2 - location) / rad2) as f32;
                let change = amplitude * falloff * multiplier;

                for &index in self.mirrored_indices(center, dx, dz).as_slice() {
                    self.add_clamped(index, change);
                }
            }
        }
    }

    pub(crate) fn add_clamped(&mut self, index: usize, change: f32) {
        let height = &mut self.heights[index];
        *height = self.clamp.apply(*height + change);
    }
}
