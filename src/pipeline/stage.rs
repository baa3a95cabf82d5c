//! Generation stage trait and pipeline orchestration.

use rand::RngCore;
use thiserror::Error;
use tracing::debug;

use crate::color::{ColorConfig, Gradient, map_colors};
use crate::heightmap::{HeightmapConfig, SynthesisError, synthesize};
use crate::mesh::build_triangles;
use crate::noise::CoherentNoise;
use crate::terrain::TerrainBuild;

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Bump stamping, linking and noise blend.
    Heightmap,
    /// Height-based vertex colors.
    Colors,
    /// Grid triangulation.
    Triangles,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Heightmap => "heightmap",
            StageId::Colors => "colors",
            StageId::Triangles => "triangles",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
    #[error("Heightmap synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),
}

/// Injected sources every stage draws from.
///
/// Passed explicitly so a run can be reproduced by fixing the seed and the
/// noise function.
pub struct StageContext<'a> {
    pub rng: &'a mut dyn RngCore,
    pub noise: &'a dyn CoherentNoise,
}

/// Trait for implementing generation stages.
///
/// Each stage fills in part of the build buffer, building upon previous
/// stages.
pub trait GenerationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the generation stage, modifying the build in place.
    fn execute(&self, build: &mut TerrainBuild, ctx: &mut StageContext<'_>) -> Result<(), PipelineError>;
}

/// Orchestrates multiple generation stages into a complete pipeline.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
}

impl Pipeline {
    /// Creates a new empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Executes all stages in order on the given build.
    pub fn run(&self, build: &mut TerrainBuild, ctx: &mut StageContext<'_>) -> Result<(), PipelineError> {
        self.run_with_callbacks(build, ctx, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        build: &mut TerrainBuild,
        ctx: &mut StageContext<'_>,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            stage.execute(build, ctx)?;
            completed.push(stage.id());
            debug!(stage = stage.name(), "stage complete");

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Heightmap synthesis stage.
pub struct HeightmapStage {
    pub config: HeightmapConfig,
}

impl HeightmapStage {
    pub fn new(config: HeightmapConfig) -> Self {
        Self { config }
    }
}

impl GenerationStage for HeightmapStage {
    fn id(&self) -> StageId {
        StageId::Heightmap
    }

    fn name(&self) -> &str {
        "Heightmap Synthesis"
    }

    fn execute(&self, build: &mut TerrainBuild, ctx: &mut StageContext<'_>) -> Result<(), PipelineError> {
        let heights = synthesize(&build.grid, &self.config, &mut *ctx.rng, ctx.noise)?;
        build.heights = Some(heights);
        Ok(())
    }
}

/// Vertex color stage.
pub struct ColorStage {
    pub config: ColorConfig,
    pub gradient: Gradient,
}

impl ColorStage {
    pub fn new(config: ColorConfig, gradient: Gradient) -> Self {
        Self { config, gradient }
    }
}

impl GenerationStage for ColorStage {
    fn id(&self) -> StageId {
        StageId::Colors
    }

    fn name(&self) -> &str {
        "Color Mapping"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Heightmap]
    }

    fn execute(&self, build: &mut TerrainBuild, _ctx: &mut StageContext<'_>) -> Result<(), PipelineError> {
        let heights = build.heights.as_ref().ok_or_else(|| {
            PipelineError::StageFailed(
                self.name().to_string(),
                "Missing heights (run Heightmap stage first)".to_string(),
            )
        })?;

        build.colors = Some(map_colors(heights, &self.config, &self.gradient));
        Ok(())
    }
}

/// Grid triangulation stage. Height-independent, so it has no dependencies.
pub struct TriangleStage;

impl GenerationStage for TriangleStage {
    fn id(&self) -> StageId {
        StageId::Triangles
    }

    fn name(&self) -> &str {
        "Triangulation"
    }

    fn execute(&self, build: &mut TerrainBuild, _ctx: &mut StageContext<'_>) -> Result<(), PipelineError> {
        build.indices = Some(build_triangles(&build.grid));
        Ok(())
    }
}
