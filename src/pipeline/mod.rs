//! The synchronous document pipeline and its builder.

mod builder;
mod orchestrator;

pub use builder::DocumentPipelineBuilder;
pub use orchestrator::DocumentPipeline;
