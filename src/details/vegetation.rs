//! Height-banded random vegetation scattering.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised by invalid vegetation groups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetailsError {
    #[error("Vegetation group {group} has no variants")]
    NoVariants { group: usize },
    #[error("Vegetation group {group}: density {density} must be within [0, 1]")]
    InvalidDensity { group: usize, density: f32 },
}

/// Half-open height band `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightBand {
    pub min: f32,
    pub max: f32,
}

impl HeightBand {
    pub fn contains(&self, height: f32) -> bool {
        height >= self.min && height < self.max
    }
}

/// A family of interchangeable plants sharing a height band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetationGroup {
    pub name: String,
    /// Number of interchangeable models in the group.
    pub variants: u32,
    pub band: HeightBand,
    /// Chance of a placement per eligible vertex.
    pub density: f32,
}

impl VegetationGroup {
    /// Sparse trees on low and mid ground.
    pub fn forest() -> Self {
        Self {
            name: "forest".to_string(),
            variants: 3,
            band: HeightBand { min: 1.0, max: 18.0 },
            density: 0.04,
        }
    }

    /// Reeds along the shore.
    pub fn shoreline() -> Self {
        Self {
            name: "shoreline".to_string(),
            variants: 2,
            band: HeightBand { min: -1.0, max: 1.0 },
            density: 0.1,
        }
    }
}

/// One plant to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VegetationPlacement {
    /// Index into the group list.
    pub group: usize,
    pub variant: u32,
    pub position: Vec3,
    /// Rotation around +Y, radians.
    pub yaw: f32,
}

/// Scatters vegetation over `positions` offset by `origin`.
///
/// Every vertex is tried against every group in order; a vertex whose height
/// lies in the group's band gets a placement when a uniform draw is at most
/// the group density.
pub fn place_vegetation<R: Rng + ?Sized>(
    positions: &[Vec3],
    origin: Vec3,
    groups: &[VegetationGroup],
    rng: &mut R,
) -> Result<Vec<VegetationPlacement>, DetailsError> {
    for (group, g) in groups.iter().enumerate() {
        if g.variants == 0 {
            return Err(DetailsError::NoVariants { group });
        }
        if !(0.0..=1.0).contains(&g.density) {
            return Err(DetailsError::InvalidDensity { group, density: g.density });
        }
    }

    let mut placements = Vec::new();

    for &p in positions {
        let position = p + origin;
        for (group, g) in groups.iter().enumerate() {
            if !g.band.contains(position.y) || rng.random::<f32>() > g.density {
                continue;
            }
            placements.push(VegetationPlacement {
                group,
                variant: rng.random_range(0..g.variants),
                position,
                yaw: rng.random_range(0.0..TAU),
            });
        }
    }

    debug!(placements = placements.len(), groups = groups.len(), "placed vegetation");
    Ok(placements)
}
