use serde::{Deserialize, Serialize};

use crate::color::HueScale;
use crate::consts::{
    DEFAULT_CANNY_HIGH_THRESHOLD, DEFAULT_CANNY_LOW_THRESHOLD, DEFAULT_CLOUD_BRIGHTNESS_THRESHOLD,
    DEFAULT_DOWNSAMPLE_RATIO,
};
use crate::error::{NimbusError, Result};
use crate::preprocess::ResampleFilter;

/// Full configuration of one feature-extraction run.
///
/// Every section falls back to its defaults when missing from a TOML file,
/// so an empty file reproduces the station's reference behaviour.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub preprocess: PreprocessConfig,
    #[serde(default)]
    pub edges: EdgeConfig,
    #[serde(default)]
    pub texture: TextureConfig,
    #[serde(default)]
    pub coverage: CoverageConfig,
}

impl PipelineConfig {
    /// Reject values that would make a stage meaningless.
    pub fn validate(&self) -> Result<()> {
        let ratio = self.preprocess.downsample_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(NimbusError::InvalidConfig(format!(
                "downsample_ratio must be a positive number, got {ratio}"
            )));
        }
        if let Some([w, h]) = self.preprocess.normalize_size {
            if w == 0 || h == 0 {
                return Err(NimbusError::InvalidConfig(format!(
                    "normalize_size must be non-zero, got {w}x{h}"
                )));
            }
        }

        let (low, high) = (self.edges.low_threshold, self.edges.high_threshold);
        if !low.is_finite() || !high.is_finite() || low < 0.0 {
            return Err(NimbusError::InvalidConfig(format!(
                "edge thresholds must be finite and non-negative, got {low}/{high}"
            )));
        }
        // Swapped thresholds are an error here, not reordered into low/high.
        if low > high {
            return Err(NimbusError::InvalidConfig(format!(
                "edge low threshold {low} exceeds high threshold {high}"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Uniform scale factor applied to both axes before analysis.
    #[serde(default = "default_downsample_ratio")]
    pub downsample_ratio: f64,
    /// Interpolation used when resampling.
    #[serde(default)]
    pub filter: ResampleFilter,
    /// Resample the raw capture to this `[width, height]` first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalize_size: Option<[u32; 2]>,
    /// Packing of hue angles into a byte.
    #[serde(default)]
    pub hue_scale: HueScale,
}

fn default_downsample_ratio() -> f64 {
    DEFAULT_DOWNSAMPLE_RATIO
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            downsample_ratio: DEFAULT_DOWNSAMPLE_RATIO,
            filter: ResampleFilter::default(),
            normalize_size: None,
            hue_scale: HueScale::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    /// Gradient magnitude above which a pixel may join an edge.
    #[serde(default = "default_low_threshold")]
    pub low_threshold: f32,
    /// Gradient magnitude above which a pixel seeds an edge.
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f32,
}

fn default_low_threshold() -> f32 {
    DEFAULT_CANNY_LOW_THRESHOLD
}
fn default_high_threshold() -> f32 {
    DEFAULT_CANNY_HIGH_THRESHOLD
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            low_threshold: DEFAULT_CANNY_LOW_THRESHOLD,
            high_threshold: DEFAULT_CANNY_HIGH_THRESHOLD,
        }
    }
}

/// What to do with frames too small to have an LBP interior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegeneratePolicy {
    /// Fail the run with `DegenerateInput`.
    #[default]
    Reject,
    /// Report all texture statistics as 0 and keep the other descriptors.
    ZeroTexture,
}

impl std::fmt::Display for DegeneratePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reject => write!(f, "Reject"),
            Self::ZeroTexture => write!(f, "Zero Texture"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureConfig {
    #[serde(default)]
    pub degenerate: DegeneratePolicy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// Gray level a pixel must exceed to count as cloud.
    #[serde(default = "default_brightness_threshold")]
    pub brightness_threshold: u8,
}

fn default_brightness_threshold() -> u8 {
    DEFAULT_CLOUD_BRIGHTNESS_THRESHOLD
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            brightness_threshold: DEFAULT_CLOUD_BRIGHTNESS_THRESHOLD,
        }
    }
}
