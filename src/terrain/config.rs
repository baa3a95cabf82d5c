//! Top-level terrain configuration.

use serde::{Deserialize, Serialize};

use crate::color::ColorConfig;
use crate::grid::{GridConfig, TerrainGrid};
use crate::heightmap::{BumpSpec, HeightmapConfig};
use crate::noise::FractalNoiseConfig;
use super::generator::TerrainError;

/// Everything needed to generate a terrain, apart from the color gradient and
/// the random source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TerrainConfig {
    pub grid: GridConfig,
    pub heightmap: HeightmapConfig,
    pub colors: ColorConfig,
    /// Settings of the default fractal noise.
    pub noise: FractalNoiseConfig,
}

impl TerrainConfig {
    /// A 64×64 terrain without mountains, small enough for quick previews.
    pub fn compact() -> Self {
        Self {
            grid: GridConfig::square(64),
            heightmap: HeightmapConfig {
                bumps: vec![BumpSpec::hills(), BumpSpec::lakes(), BumpSpec::rivers()],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Runs every configuration check and returns the validated grid.
    pub fn validate(&self) -> Result<TerrainGrid, TerrainError> {
        let grid = self.grid.build()?;
        self.heightmap.validate(&grid)?;
        self.colors.validate()?;
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::SynthesisError;

    #[test]
    fn test_presets_validate() {
        assert!(TerrainConfig::default().validate().is_ok());
        assert!(TerrainConfig::compact().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_problem() {
        let mut config = TerrainConfig::compact();
        config.grid.width = 0;
        assert!(matches!(config.validate(), Err(TerrainError::Grid(_))));

        let mut config = TerrainConfig::compact();
        config.heightmap.bumps.push(BumpSpec::mountains());
        assert!(matches!(
            config.validate(),
            Err(TerrainError::Synthesis(SynthesisError::EmptyPlacementRange { spec: 3, .. }))
        ));

        let mut config = TerrainConfig::compact();
        config.colors.peak_level = config.colors.water_level;
        assert!(matches!(config.validate(), Err(TerrainError::Gradient(_))));
    }
}
