use crate::edges::EdgeMap;
use crate::features::FeatureVector;
use crate::frame::{LbpFrame, PreparedFrame};

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Loading,
    Preprocessing,
    EdgeDetection,
    Texture,
    ColorStatistics,
    CloudCoverage,
    Aggregating,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading image"),
            Self::Preprocessing => write!(f, "Preprocessing"),
            Self::EdgeDetection => write!(f, "Detecting edges"),
            Self::Texture => write!(f, "Computing texture"),
            Self::ColorStatistics => write!(f, "Color statistics"),
            Self::CloudCoverage => write!(f, "Estimating cloud cover"),
            Self::Aggregating => write!(f, "Aggregating features"),
        }
    }
}

/// Features of one frame together with the intermediate maps they were
/// computed from.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub features: FeatureVector,
    pub prepared: PreparedFrame,
    pub edges: EdgeMap,
    pub lbp: LbpFrame,
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started.
    fn begin_stage(&self, _stage: PipelineStage) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used by the unreported entry points.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
