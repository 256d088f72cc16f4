use crate::frame::GrayFrame;
use crate::pipeline::config::CoverageConfig;

/// Number of pixels strictly brighter than `threshold`.
pub fn bright_pixel_count(gray: &GrayFrame, threshold: u8) -> usize {
    gray.data.iter().filter(|&&v| v > threshold).count()
}

/// Percentage (0-100) of pixels brighter than the configured threshold.
///
/// A brightness heuristic for cloud cover, not a segmentation. Empty frames
/// report 0.
pub fn cloud_percentage(gray: &GrayFrame, config: &CoverageConfig) -> f64 {
    let total = gray.pixel_count();
    if total == 0 {
        return 0.0;
    }
    let bright = bright_pixel_count(gray, config.brightness_threshold);
    bright as f64 / total as f64 * 100.0
}
