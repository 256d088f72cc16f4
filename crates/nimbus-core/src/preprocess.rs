use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{to_grayscale, to_hsv};
use crate::error::{NimbusError, Result};
use crate::frame::{PreparedFrame, RasterImage};
use crate::pipeline::config::PreprocessConfig;

/// Interpolation kernel used when resampling a raster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResampleFilter {
    Nearest,
    /// Linear interpolation.
    #[default]
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl ResampleFilter {
    fn filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl std::fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "Nearest"),
            Self::Triangle => write!(f, "Linear"),
            Self::CatmullRom => write!(f, "Catmull-Rom"),
            Self::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}

/// Target size after scaling `(width, height)` by `ratio`, rounded to the
/// nearest pixel. Fails if either side rounds to zero.
pub fn scaled_dimensions(width: u32, height: u32, ratio: f64) -> Result<(u32, u32)> {
    let sw = (width as f64 * ratio).round();
    let sh = (height as f64 * ratio).round();
    if sw < 1.0 || sh < 1.0 || sw > u32::MAX as f64 || sh > u32::MAX as f64 {
        return Err(NimbusError::InvalidDimensions {
            width: sw.max(0.0) as u32,
            height: sh.max(0.0) as u32,
        });
    }
    Ok((sw as u32, sh as u32))
}

/// Resample a raster to exactly `width` x `height`.
///
/// A request for the current size returns an unmodified copy.
pub fn resize_raster(raster: &RasterImage, width: u32, height: u32, filter: ResampleFilter) -> Result<RasterImage> {
    if width == 0 || height == 0 {
        return Err(NimbusError::InvalidDimensions { width, height });
    }
    if (width, height) == (raster.width(), raster.height()) {
        return Ok(raster.clone());
    }

    let filter = filter.filter_type();
    Ok(match raster {
        RasterImage::Gray(img) => RasterImage::Gray(imageops::resize(img, width, height, filter)),
        RasterImage::Color(img) => RasterImage::Color(imageops::resize(img, width, height, filter)),
    })
}

/// Uniformly scale a raster by `ratio`.
pub fn downsample(raster: &RasterImage, ratio: f64, filter: ResampleFilter) -> Result<RasterImage> {
    let (w, h) = scaled_dimensions(raster.width(), raster.height(), ratio)?;
    resize_raster(raster, w, h, filter)
}

/// Bring a raw capture to the station's canonical size with Lanczos
/// resampling, the way the camera script stores its frames.
pub fn normalize_capture(raster: &RasterImage, size: [u32; 2]) -> Result<RasterImage> {
    resize_raster(raster, size[0], size[1], ResampleFilter::Lanczos3)
}

/// Produce the grayscale and HSV working frames from one base frame.
pub fn preprocess(raster: &RasterImage, config: &PreprocessConfig) -> Result<PreparedFrame> {
    let source = match config.normalize_size {
        Some(size) => normalize_capture(raster, size)?,
        None => raster.clone(),
    };

    let base = downsample(&source, config.downsample_ratio, config.filter)?;
    debug!(
        source_width = raster.width(),
        source_height = raster.height(),
        width = base.width(),
        height = base.height(),
        "Downsampled base frame"
    );

    Ok(PreparedFrame {
        gray: to_grayscale(&base),
        hsv: to_hsv(&base, config.hue_scale),
    })
}
