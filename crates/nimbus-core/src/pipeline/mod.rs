pub mod batch;
pub mod config;
mod orchestrator;
mod types;

pub use batch::{extract_batch, extract_batch_with_progress, BatchItem};
pub use orchestrator::{
    analyze_frames, analyze_frames_reported, analyze_raster, extract_features, extract_features_from_bytes,
    extract_features_from_path, extract_features_from_path_reported, extract_features_reported,
};
pub use types::{Analysis, PipelineStage, ProgressReporter};
