//! Pipeline module for orchestrating terrain generation stages.
//!
//! Provides a trait-based architecture for generation stages that are
//! composed into one pass over a fresh build buffer.

mod stage;

pub use stage::{
    GenerationStage, StageId, StageContext, Pipeline, PipelineError,
    HeightmapStage, ColorStage, TriangleStage,
};
