//! Initialize/generate lifecycle around the stage pipeline.

use std::time::Instant;

use rand::RngCore;
use thiserror::Error;
use tracing::info;

use crate::color::{Gradient, GradientError};
use crate::grid::{GridError, TerrainGrid};
use crate::heightmap::SynthesisError;
use crate::mesh::{MeshError, TerrainMesh, assemble_mesh};
use crate::noise::{CoherentNoise, FractalNoise2d};
use crate::pipeline::{ColorStage, HeightmapStage, Pipeline, PipelineError, StageContext, TriangleStage};
use super::build::TerrainBuild;
use super::config::TerrainConfig;

/// Errors surfaced by [`TerrainGenerator`].
#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("Terrain generator used before initialize()")]
    NotInitialized,
    #[error("Generation pass finished without {0}")]
    Incomplete(&'static str),
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
    #[error("Heightmap configuration error: {0}")]
    Synthesis(#[from] SynthesisError),
    #[error("Color configuration error: {0}")]
    Gradient(#[from] GradientError),
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("Mesh assembly error: {0}")]
    Mesh(#[from] MeshError),
}

struct Prepared {
    grid: TerrainGrid,
    pipeline: Pipeline,
}

/// Owns a terrain configuration and the last mesh generated from it.
///
/// Call [`initialize`](Self::initialize) once, then
/// [`generate`](Self::generate) as often as needed. Each generation rebuilds
/// everything from scratch and replaces the previous mesh only on success.
pub struct TerrainGenerator {
    config: TerrainConfig,
    gradient: Gradient,
    noise: Box<dyn CoherentNoise>,
    prepared: Option<Prepared>,
    mesh: Option<TerrainMesh>,
}

impl TerrainGenerator {
    /// Creates a generator using fractal noise built from `config.noise`.
    pub fn new(config: TerrainConfig, gradient: Gradient) -> Self {
        let noise = FractalNoise2d::new(config.noise.clone());
        Self {
            config,
            gradient,
            noise: Box::new(noise),
            prepared: None,
            mesh: None,
        }
    }

    /// Replaces the noise field sampled by the blend pass.
    pub fn with_noise<N: CoherentNoise + 'static>(mut self, noise: N) -> Self {
        self.noise = Box::new(noise);
        self
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.prepared.is_some()
    }

    /// The most recently published mesh, if any.
    pub fn mesh(&self) -> Option<&TerrainMesh> {
        self.mesh.as_ref()
    }

    /// Validates the configuration and prepares the grid and stage pipeline.
    pub fn initialize(&mut self) -> Result<(), TerrainError> {
        let grid = self.config.validate()?;

        let mut pipeline = Pipeline::new();
        pipeline
            .add_stage(HeightmapStage::new(self.config.heightmap.clone()))
            .add_stage(ColorStage::new(self.config.colors, self.gradient.clone()))
            .add_stage(TriangleStage);

        self.prepared = Some(Prepared { grid, pipeline });
        Ok(())
    }

    /// Runs one full generation pass and publishes the resulting mesh.
    pub fn generate<R: RngCore>(&mut self, rng: &mut R) -> Result<&TerrainMesh, TerrainError> {
        let prepared = self.prepared.as_ref().ok_or(TerrainError::NotInitialized)?;
        let start = Instant::now();

        let mut build = TerrainBuild::new(prepared.grid);
        let mut ctx = StageContext {
            rng,
            noise: self.noise.as_ref(),
        };
        prepared.pipeline.run(&mut build, &mut ctx)?;

        let heights = build.heights.ok_or(TerrainError::Incomplete("heights"))?;
        let colors = build.colors.ok_or(TerrainError::Incomplete("colors"))?;
        let indices = build.indices.ok_or(TerrainError::Incomplete("triangles"))?;
        let mesh = assemble_mesh(&prepared.grid, self.config.grid.scale, heights, colors, indices)?;

        info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "terrain generated"
        );

        Ok(&*self.mesh.insert(mesh))
    }
}
