use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::warn;

use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::error::Result;
use crate::features::FeatureVector;

use super::config::PipelineConfig;
use super::orchestrator::extract_features_from_path;

/// Outcome of one frame in a batch.
#[derive(Debug)]
pub struct BatchItem {
    pub path: PathBuf,
    pub result: Result<FeatureVector>,
}

fn run_one(path: &Path, config: &PipelineConfig) -> BatchItem {
    let result = extract_features_from_path(path, config);
    if let Err(ref e) = result {
        warn!(path = %path.display(), error = %e, "Skipping frame");
    }
    BatchItem {
        path: path.to_path_buf(),
        result,
    }
}

/// Analyze independent frames, one task per frame on the Rayon pool.
///
/// Results come back in input order. A frame that fails does not affect
/// the others.
pub fn extract_batch(paths: &[PathBuf], config: &PipelineConfig) -> Vec<BatchItem> {
    extract_batch_with_progress(paths, config, |_| {})
}

/// [`extract_batch`] with per-frame progress reporting.
///
/// Calls `on_progress(items_done)` as each frame finishes.
pub fn extract_batch_with_progress(
    paths: &[PathBuf],
    config: &PipelineConfig,
    on_progress: impl Fn(usize) + Send + Sync,
) -> Vec<BatchItem> {
    let done = AtomicUsize::new(0);
    let process = |path: &PathBuf| {
        let item = run_one(path, config);
        let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
        on_progress(completed);
        item
    };

    if paths.len() < PARALLEL_FRAME_THRESHOLD {
        paths.iter().map(process).collect()
    } else {
        paths.par_iter().map(process).collect()
    }
}
