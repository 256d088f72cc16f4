use image::{DynamicImage, GrayImage, RgbImage};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{NimbusError, Result};

/// Byte order of an interleaved raw pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelLayout {
    Gray,
    Rgb,
    Bgr,
}

impl ChannelLayout {
    pub fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb | Self::Bgr => COLOR_CHANNEL_COUNT,
        }
    }
}

impl std::fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gray => write!(f, "Gray"),
            Self::Rgb => write!(f, "RGB"),
            Self::Bgr => write!(f, "BGR"),
        }
    }
}

/// An 8-bit raster as handed over by the capture side.
///
/// Color data is held in RGB order regardless of the source layout; BGR
/// buffers are reordered on construction.
#[derive(Clone, Debug)]
pub enum RasterImage {
    Gray(GrayImage),
    Color(RgbImage),
}

impl RasterImage {
    /// Wrap a decoded image. Anything that is not single-channel is
    /// flattened to 8-bit RGB (alpha is dropped).
    pub fn from_dynamic(img: DynamicImage) -> Result<Self> {
        let raster = match img {
            DynamicImage::ImageLuma8(gray) => Self::Gray(gray),
            other if other.color().channel_count() <= 2 => Self::Gray(other.to_luma8()),
            other => Self::Color(other.to_rgb8()),
        };
        raster.check_dimensions()?;
        Ok(raster)
    }

    /// Build a raster from an interleaved, row-major buffer with no padding.
    pub fn from_interleaved(width: u32, height: u32, layout: ChannelLayout, data: &[u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(NimbusError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * layout.channels();
        if data.len() != expected {
            return Err(NimbusError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }

        let raster = match layout {
            ChannelLayout::Gray => GrayImage::from_raw(width, height, data.to_vec()).map(Self::Gray),
            ChannelLayout::Rgb => RgbImage::from_raw(width, height, data.to_vec()).map(Self::Color),
            ChannelLayout::Bgr => {
                let mut rgb = Vec::with_capacity(expected);
                for px in data.chunks_exact(COLOR_CHANNEL_COUNT) {
                    rgb.extend_from_slice(&[px[2], px[1], px[0]]);
                }
                RgbImage::from_raw(width, height, rgb).map(Self::Color)
            }
        };
        raster.ok_or(NimbusError::InvalidBuffer {
            expected,
            actual: data.len(),
        })
    }

    pub fn width(&self) -> u32 {
        match self {
            Self::Gray(img) => img.width(),
            Self::Color(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Gray(img) => img.height(),
            Self::Color(img) => img.height(),
        }
    }

    fn check_dimensions(&self) -> Result<()> {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return Err(NimbusError::InvalidDimensions { width, height });
        }
        Ok(())
    }
}

/// Single-channel intensity plane, shape = (height, width).
#[derive(Clone, Debug, PartialEq)]
pub struct GrayFrame {
    pub data: Array2<u8>,
}

impl GrayFrame {
    pub fn new(data: Array2<u8>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }
}

/// Hue, saturation and value planes of the same frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HsvFrame {
    pub hue: Array2<u8>,
    pub saturation: Array2<u8>,
    pub value: Array2<u8>,
}

impl HsvFrame {
    pub fn width(&self) -> usize {
        self.hue.ncols()
    }

    pub fn height(&self) -> usize {
        self.hue.nrows()
    }
}

/// Per-pixel LBP codes. The 1-pixel border is always zero.
#[derive(Clone, Debug, PartialEq)]
pub struct LbpFrame {
    pub data: Array2<u8>,
}

/// The grayscale/HSV pair derived from one downsampled base frame.
#[derive(Clone, Debug)]
pub struct PreparedFrame {
    pub gray: GrayFrame,
    pub hsv: HsvFrame,
}

/// Fail unless the gray plane and all three HSV planes share one shape.
pub fn check_same_shape(gray: &GrayFrame, hsv: &HsvFrame) -> Result<()> {
    let shape = gray.data.dim();
    let (hue, saturation, value) = (hsv.hue.dim(), hsv.saturation.dim(), hsv.value.dim());
    if hue != shape || saturation != shape || value != shape {
        return Err(NimbusError::FrameShapeMismatch {
            gray: shape,
            hue,
            saturation,
            value,
        });
    }
    Ok(())
}
