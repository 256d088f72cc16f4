use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::color::color_statistics;
use crate::coverage::cloud_percentage;
use crate::edges::{detect_edges, EdgeMap};
use crate::error::Result;
use crate::features::{aggregate, FeatureVector};
use crate::frame::{check_same_shape, GrayFrame, HsvFrame, LbpFrame, RasterImage};
use crate::io::image_io::{decode_raster, load_raster};
use crate::preprocess::preprocess;
use crate::texture::describe_lbp;

use super::config::PipelineConfig;
use super::types::{Analysis, NoOpReporter, PipelineStage, ProgressReporter};

/// Stages 2-6 over an already prepared gray/HSV pair.
fn run_stages(
    gray: &GrayFrame,
    hsv: &HsvFrame,
    config: &PipelineConfig,
    reporter: &dyn ProgressReporter,
) -> Result<(FeatureVector, EdgeMap, LbpFrame)> {
    reporter.begin_stage(PipelineStage::EdgeDetection);
    let edges = detect_edges(gray, &config.edges);
    let edge_count = edges.edge_count();
    debug!(edge_count, "Edge detection complete");
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Texture);
    let (lbp, texture) = describe_lbp(gray, &config.texture)?;
    debug!(mean = texture.mean, stddev = texture.stddev, entropy = texture.entropy, "LBP texture complete");
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::ColorStatistics);
    let color = color_statistics(hsv);
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::CloudCoverage);
    let cloud = cloud_percentage(gray, &config.coverage);
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Aggregating);
    let features = aggregate(edge_count, texture, color, cloud);
    reporter.finish_stage();

    info!(
        edge_count = features.edge_count,
        lbp_mean = features.lbp_mean,
        lbp_stddev = features.lbp_stddev,
        lbp_entropy = features.lbp_entropy,
        hue_mean = features.hue_mean,
        saturation_mean = features.saturation_mean,
        value_mean = features.value_mean,
        cloud_percentage = features.cloud_percentage,
        "Feature extraction complete"
    );

    Ok((features, edges, lbp))
}

/// Compute the feature vector of a prepared gray/HSV pair.
///
/// Both must come from the same base frame; planes of differing shape are
/// rejected. Deterministic: the same pair and config always give the same
/// vector.
pub fn analyze_frames(gray: &GrayFrame, hsv: &HsvFrame, config: &PipelineConfig) -> Result<FeatureVector> {
    analyze_frames_reported(gray, hsv, config, Arc::new(NoOpReporter))
}

/// [`analyze_frames`] with stage progress reporting.
pub fn analyze_frames_reported(
    gray: &GrayFrame,
    hsv: &HsvFrame,
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<FeatureVector> {
    config.validate()?;
    check_same_shape(gray, hsv)?;
    run_stages(gray, hsv, config, reporter.as_ref()).map(|(features, _, _)| features)
}

fn analyze_raster_reported(
    raster: &RasterImage,
    config: &PipelineConfig,
    reporter: &dyn ProgressReporter,
) -> Result<Analysis> {
    config.validate()?;

    reporter.begin_stage(PipelineStage::Preprocessing);
    let prepared = preprocess(raster, &config.preprocess)?;
    reporter.finish_stage();

    let (features, edges, lbp) = run_stages(&prepared.gray, &prepared.hsv, config, reporter)?;
    Ok(Analysis {
        features,
        prepared,
        edges,
        lbp,
    })
}

/// Run the whole pipeline and keep the intermediate maps.
pub fn analyze_raster(raster: &RasterImage, config: &PipelineConfig) -> Result<Analysis> {
    analyze_raster_reported(raster, config, &NoOpReporter)
}

/// Run the whole pipeline on a raster with a thread-safe progress reporter.
pub fn extract_features_reported(
    raster: &RasterImage,
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<FeatureVector> {
    analyze_raster_reported(raster, config, reporter.as_ref()).map(|a| a.features)
}

/// Run the whole pipeline on a raster.
pub fn extract_features(raster: &RasterImage, config: &PipelineConfig) -> Result<FeatureVector> {
    analyze_raster(raster, config).map(|a| a.features)
}

/// Load an image file and run the pipeline on it.
pub fn extract_features_from_path(path: &Path, config: &PipelineConfig) -> Result<FeatureVector> {
    info!(path = %path.display(), "Analyzing image");
    let raster = load_raster(path)?;
    extract_features(&raster, config)
}

/// Decode an in-memory image and run the pipeline on it.
pub fn extract_features_from_bytes(bytes: &[u8], config: &PipelineConfig) -> Result<FeatureVector> {
    let raster = decode_raster(bytes)?;
    extract_features(&raster, config)
}

/// [`extract_features_from_path`] with stage progress reporting.
pub fn extract_features_from_path_reported(
    path: &Path,
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<FeatureVector> {
    reporter.begin_stage(PipelineStage::Loading);
    let raster = load_raster(path)?;
    reporter.finish_stage();
    extract_features_reported(&raster, config, reporter)
}
