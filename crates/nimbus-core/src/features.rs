use serde::{Deserialize, Serialize};

use crate::color::ColorStats;
use crate::texture::TextureStats;

/// Scalar descriptors of one sky frame.
///
/// All values describe the same downsampled base frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Canny edge pixels in the grayscale frame.
    pub edge_count: u64,
    pub lbp_mean: f64,
    pub lbp_stddev: f64,
    pub lbp_entropy: f64,
    pub hue_mean: f64,
    pub saturation_mean: f64,
    pub value_mean: f64,
    /// Share of pixels above the brightness threshold, 0-100.
    pub cloud_percentage: f64,
}

/// Merge the per-stage outputs into one record.
pub fn aggregate(edge_count: u64, texture: TextureStats, color: ColorStats, cloud_percentage: f64) -> FeatureVector {
    FeatureVector {
        edge_count,
        lbp_mean: texture.mean,
        lbp_stddev: texture.stddev,
        lbp_entropy: texture.entropy,
        hue_mean: color.hue_mean,
        saturation_mean: color.saturation_mean,
        value_mean: color.value_mean,
        cloud_percentage,
    }
}
