use tracing::debug;

use crate::consts::{LBP_ENTROPY_EPSILON, MIN_TEXTURE_DIMENSION};
use crate::error::{NimbusError, Result};
use crate::frame::{GrayFrame, LbpFrame};
use crate::pipeline::config::{DegeneratePolicy, TextureConfig};

use super::lbp::compute_lbp;

/// Summary statistics of an LBP image.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextureStats {
    pub mean: f64,
    /// Population standard deviation.
    pub stddev: f64,
    pub entropy: f64,
}

/// Mean and population standard deviation over every LBP pixel.
///
/// The zero border is part of the sample, which pulls both values towards
/// zero on small frames.
pub fn lbp_mean_stddev(lbp: &LbpFrame) -> (f64, f64) {
    let n = lbp.data.len() as f64;
    if n == 0.0 {
        return (0.0, 0.0);
    }
    let sum: u64 = lbp.data.iter().map(|&v| v as u64).sum();
    let mean = sum as f64 / n;
    let var: f64 = lbp
        .data
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    (mean, var.sqrt())
}

/// Weighted-log sum `-sum(p * log2(p + eps))` with `p = code / 255`, taken
/// per pixel (not over a histogram).
///
/// Codes of 255 contribute `-log2(1 + eps)`, a tiny negative amount, so the
/// total is floored at zero.
pub fn lbp_entropy(lbp: &LbpFrame) -> f64 {
    let total: f64 = lbp
        .data
        .iter()
        .map(|&v| {
            let p = v as f64 / 255.0;
            -p * (p + LBP_ENTROPY_EPSILON).log2()
        })
        .sum();
    total.max(0.0)
}

/// Reduce an LBP image to its summary statistics.
pub fn texture_stats(lbp: &LbpFrame) -> TextureStats {
    let (mean, stddev) = lbp_mean_stddev(lbp);
    TextureStats {
        mean,
        stddev,
        entropy: lbp_entropy(lbp),
    }
}

/// Compute the LBP image of `gray` and summarize it.
///
/// Frames without an interior pixel are handled per `config.degenerate`;
/// when accepted they yield an all-zero LBP image and zero statistics.
pub fn describe_lbp(gray: &GrayFrame, config: &TextureConfig) -> Result<(LbpFrame, TextureStats)> {
    let (w, h) = (gray.width() as u32, gray.height() as u32);
    let lbp = compute_lbp(gray);

    if w < MIN_TEXTURE_DIMENSION || h < MIN_TEXTURE_DIMENSION {
        return match config.degenerate {
            DegeneratePolicy::Reject => Err(NimbusError::DegenerateInput { width: w, height: h }),
            DegeneratePolicy::ZeroTexture => {
                debug!(width = w, height = h, "Frame too small for LBP, using zero texture");
                Ok((lbp, TextureStats::default()))
            }
        };
    }

    let stats = texture_stats(&lbp);
    Ok((lbp, stats))
}

/// Texture statistics of `gray`, see [`describe_lbp`].
pub fn describe_texture(gray: &GrayFrame, config: &TextureConfig) -> Result<TextureStats> {
    describe_lbp(gray, config).map(|(_, stats)| stats)
}
