//! Heightmap synthesis configuration.

use serde::{Deserialize, Serialize};

use crate::grid::TerrainGrid;
use super::bumps::{largest_radius, placement_ranges};
use super::synthesis::SynthesisError;

/// Integer height band of a bump type.
///
/// `max` is the base bump radius (and amplitude); `min` drives the depth of
/// link chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightRange {
    pub min: i32,
    pub max: i32,
}

impl HeightRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

/// Which bump pairs a link pass draws chains for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkPairs {
    /// Every ordered pair `(i, j)`, `i != j`. Qualifying pairs are drawn twice.
    #[default]
    Ordered,
    /// Only pairs with `i < j`; each qualifying pair is drawn once.
    Unordered,
}

/// One family of bumps stamped onto the terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BumpSpec {
    /// Number of bumps to place.
    pub count: u32,
    /// Height band; see [`HeightRange`].
    pub height_range: HeightRange,
    /// Sign and scale of each bump (1 raises, -1 lowers).
    pub direction: f32,
    /// Chain nearby bumps of this spec together.
    pub link: bool,
    /// Centers closer than this are linked.
    pub max_link_distance: f32,
    #[serde(default)]
    pub link_pairs: LinkPairs,
}

impl BumpSpec {
    /// Large raised peaks.
    pub fn mountains() -> Self {
        Self {
            count: 4,
            height_range: HeightRange::new(8, 20),
            direction: 1.0,
            link: false,
            max_link_distance: 0.0,
            link_pairs: LinkPairs::Ordered,
        }
    }

    /// Small raised mounds.
    pub fn hills() -> Self {
        Self {
            count: 12,
            height_range: HeightRange::new(3, 8),
            direction: 1.0,
            link: false,
            max_link_distance: 0.0,
            link_pairs: LinkPairs::Ordered,
        }
    }

    /// Sunken basins.
    pub fn lakes() -> Self {
        Self {
            count: 3,
            height_range: HeightRange::new(4, 10),
            direction: -1.0,
            link: false,
            max_link_distance: 0.0,
            link_pairs: LinkPairs::Ordered,
        }
    }

    /// Small dips chained into channels. The negative `min` makes the link
    /// chains carve.
    pub fn rivers() -> Self {
        Self {
            count: 6,
            height_range: HeightRange::new(-2, 4),
            direction: -1.0,
            link: true,
            max_link_distance: 90.0,
            link_pairs: LinkPairs::Ordered,
        }
    }
}

/// Global bounds every height value is held within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightClamp {
    pub min: f32,
    pub max: f32,
}

impl Default for HeightClamp {
    fn default() -> Self {
        Self {
            min: -15.0,
            max: 50.0,
        }
    }
}

impl HeightClamp {
    pub fn apply(&self, height: f32) -> f32 {
        height.clamp(self.min, self.max)
    }
}

/// Parameters of the final noise pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseBlendConfig {
    /// Scale of the noise contribution.
    pub power: f32,
    /// Grid coordinates are divided by this before sampling.
    pub refinement: f32,
    /// Vertices below this height receive no noise.
    pub begin_height: f32,
    /// Height at which noise reaches full strength.
    pub end_height: f32,
}

impl Default for NoiseBlendConfig {
    fn default() -> Self {
        Self {
            power: 1.0,
            refinement: 0.8,
            begin_height: 0.0,
            end_height: 10.0,
        }
    }
}

/// Full heightmap synthesis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightmapConfig {
    /// Bump families, stamped in order onto one shared height field.
    pub bumps: Vec<BumpSpec>,
    pub clamp: HeightClamp,
    pub noise_blend: NoiseBlendConfig,
}

impl Default for HeightmapConfig {
    fn default() -> Self {
        Self {
            bumps: vec![
                BumpSpec::mountains(),
                BumpSpec::hills(),
                BumpSpec::lakes(),
                BumpSpec::rivers(),
            ],
            clamp: HeightClamp::default(),
            noise_blend: NoiseBlendConfig::default(),
        }
    }
}

impl HeightmapConfig {
    /// Configuration with no bumps, only the noise pass.
    pub fn flat() -> Self {
        Self {
            bumps: Vec::new(),
            ..Default::default()
        }
    }

    /// Checks every spec against the grid before anything is stamped.
    ///
    /// Placement feasibility is checked with the largest radius a spec can
    /// draw, so a validated config can never fail mid-synthesis. The clamp
    /// range must contain 0, the height of every vertex no pass touches.
    pub fn validate(&self, grid: &TerrainGrid) -> Result<(), SynthesisError> {
        let clamp = self.clamp;
        if !(clamp.min.is_finite() && clamp.max.is_finite())
            || clamp.min > clamp.max
            || clamp.min > 0.0
            || clamp.max < 0.0
        {
            return Err(SynthesisError::InvalidClampRange {
                min: clamp.min,
                max: clamp.max,
            });
        }

        let blend = self.noise_blend;
        if !(blend.refinement.is_finite() && blend.refinement > 0.0) {
            return Err(SynthesisError::InvalidNoiseBlend {
                field: "refinement",
                value: blend.refinement,
            });
        }
        if !(blend.end_height.is_finite() && blend.end_height > 0.0) {
            return Err(SynthesisError::InvalidNoiseBlend {
                field: "end_height",
                value: blend.end_height,
            });
        }
        if !blend.power.is_finite() {
            return Err(SynthesisError::InvalidNoiseBlend {
                field: "power",
                value: blend.power,
            });
        }

        for (spec_index, spec) in self.bumps.iter().enumerate() {
            let range = spec.height_range;
            if range.max < 1 || range.min > range.max {
                return Err(SynthesisError::InvalidHeightRange {
                    spec: spec_index,
                    min: range.min,
                    max: range.max,
                });
            }
            if !spec.direction.is_finite() {
                return Err(SynthesisError::InvalidDirection {
                    spec: spec_index,
                    value: spec.direction,
                });
            }
            if spec.count > 0 {
                placement_ranges(grid, largest_radius(range.max), spec_index)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_fits_default_grid() {
        let grid = TerrainGrid::new(200, 200).unwrap();
        assert!(HeightmapConfig::default().validate(&grid).is_ok());
    }

    #[test]
    fn test_inverted_clamp_rejected() {
        let grid = TerrainGrid::new(50, 50).unwrap();
        let config = HeightmapConfig {
            clamp: HeightClamp { min: 5.0, max: -5.0 },
            ..HeightmapConfig::flat()
        };
        assert!(matches!(
            config.validate(&grid),
            Err(SynthesisError::InvalidClampRange { .. })
        ));
    }

    #[test]
    fn test_clamp_must_contain_zero() {
        let grid = TerrainGrid::new(8, 8).unwrap();
        let mut config = HeightmapConfig::flat();
        config.clamp = HeightClamp { min: 1.0, max: 10.0 };
        config.noise_blend.begin_height = 5.0;
        assert_eq!(
            config.validate(&grid),
            Err(SynthesisError::InvalidClampRange { min: 1.0, max: 10.0 })
        );

        config.clamp = HeightClamp { min: -10.0, max: -1.0 };
        assert!(matches!(
            config.validate(&grid),
            Err(SynthesisError::InvalidClampRange { .. })
        ));

        config.clamp = HeightClamp { min: 0.0, max: 0.0 };
        assert!(config.validate(&grid).is_ok());
    }

    #[test]
    fn test_bad_height_range_rejected() {
        let grid = TerrainGrid::new(50, 50).unwrap();
        let mut spec = BumpSpec::hills();
        spec.height_range = HeightRange::new(6, 2);
        let config = HeightmapConfig {
            bumps: vec![BumpSpec::hills(), spec],
            ..HeightmapConfig::flat()
        };
        assert_eq!(
            config.validate(&grid),
            Err(SynthesisError::InvalidHeightRange { spec: 1, min: 6, max: 2 })
        );
    }

    #[test]
    fn test_spec_too_large_for_grid() {
        let grid = TerrainGrid::new(30, 30).unwrap();
        let config = HeightmapConfig {
            bumps: vec![BumpSpec::mountains()],
            ..HeightmapConfig::flat()
        };
        assert!(matches!(
            config.validate(&grid),
            Err(SynthesisError::EmptyPlacementRange { spec: 0, .. })
        ));
    }

    #[test]
    fn test_zero_count_spec_skips_placement_check() {
        let grid = TerrainGrid::new(10, 10).unwrap();
        let mut spec = BumpSpec::mountains();
        spec.count = 0;
        let config = HeightmapConfig {
            bumps: vec![spec],
            ..HeightmapConfig::flat()
        };
        assert!(config.validate(&grid).is_ok());
    }

    #[test]
    fn test_bad_noise_blend_rejected() {
        let grid = TerrainGrid::new(10, 10).unwrap();
        let mut config = HeightmapConfig::flat();
        config.noise_blend.refinement = 0.0;
        assert!(matches!(
            config.validate(&grid),
            Err(SynthesisError::InvalidNoiseBlend { field: "refinement", .. })
        ));

        let mut config = HeightmapConfig::flat();
        config.noise_blend.end_height = -1.0;
        assert!(matches!(
            config.validate(&grid),
            Err(SynthesisError::InvalidNoiseBlend { field: "end_height", .. })
        ));
    }
}
