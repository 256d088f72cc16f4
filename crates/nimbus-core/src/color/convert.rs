use image::RgbImage;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::frame::{GrayFrame, HsvFrame, RasterImage};

/// How hue angles are packed into a byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HueScale {
    /// Degrees halved, hue in [0, 180). The common 8-bit convention.
    #[default]
    HalfDegrees,
    /// Full circle stretched over [0, 256).
    FullByte,
}

impl HueScale {
    /// Number of distinct hue codes.
    pub fn range(self) -> u32 {
        match self {
            Self::HalfDegrees => 180,
            Self::FullByte => 256,
        }
    }
}

impl std::fmt::Display for HueScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HalfDegrees => write!(f, "Half Degrees (0-179)"),
            Self::FullByte => write!(f, "Full Byte (0-255)"),
        }
    }
}

/// BT.601 luma of one RGB pixel, rounded to the nearest level.
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
    y.round().clamp(0.0, 255.0) as u8
}

fn rgb_to_gray(img: &RgbImage) -> Array2<u8> {
    let (w, h) = img.dimensions();
    Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
        let [r, g, b] = img.get_pixel(col as u32, row as u32).0;
        luma(r, g, b)
    })
}

/// Luminance-preserving grayscale conversion.
pub fn to_grayscale(raster: &RasterImage) -> GrayFrame {
    let data = match raster {
        RasterImage::Gray(img) => {
            let (w, h) = img.dimensions();
            Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
                img.get_pixel(col as u32, row as u32).0[0]
            })
        }
        RasterImage::Color(img) => rgb_to_gray(img),
    };
    GrayFrame::new(data)
}

/// Convert one 8-bit RGB pixel to packed HSV.
///
/// Saturation and value use the full [0, 255] range; hue packing follows
/// `scale`. Achromatic pixels get hue 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8, scale: HueScale) -> [u8; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = (max - min) as f32;

    let s = if max == 0 {
        0
    } else {
        (255.0 * delta / max as f32).round() as u8
    };

    let degrees = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g as f32 - b as f32) / delta
    } else if max == g {
        120.0 + 60.0 * (b as f32 - r as f32) / delta
    } else {
        240.0 + 60.0 * (r as f32 - g as f32) / delta
    };
    let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };

    let range = scale.range();
    let h = (degrees * range as f32 / 360.0).round() as u32 % range;

    [h as u8, s, max]
}

/// Convert a raster to HSV planes. Gray rasters yield zero hue and saturation.
pub fn to_hsv(raster: &RasterImage, scale: HueScale) -> HsvFrame {
    let (w, h) = (raster.width() as usize, raster.height() as usize);
    let mut hue = Array2::<u8>::zeros((h, w));
    let mut saturation = Array2::<u8>::zeros((h, w));
    let mut value = Array2::<u8>::zeros((h, w));

    for row in 0..h {
        for col in 0..w {
            let [hh, ss, vv] = match raster {
                RasterImage::Gray(img) => [0, 0, img.get_pixel(col as u32, row as u32).0[0]],
                RasterImage::Color(img) => {
                    let [r, g, b] = img.get_pixel(col as u32, row as u32).0;
                    rgb_to_hsv(r, g, b, scale)
                }
            };
            hue[[row, col]] = hh;
            saturation[[row, col]] = ss;
            value[[row, col]] = vv;
        }
    }

    HsvFrame {
        hue,
        saturation,
        value,
    }
}
