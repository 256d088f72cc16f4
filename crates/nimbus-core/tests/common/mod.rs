#![allow(dead_code)]

use std::io::Cursor;

use image::{ImageFormat, RgbImage};
use ndarray::Array2;

use nimbus_core::frame::{ChannelLayout, GrayFrame, RasterImage};
use nimbus_core::pipeline::config::PipelineConfig;

/// Config that analyzes frames at their native size.
pub fn native_size_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.preprocess.downsample_ratio = 1.0;
    config
}

/// Small deterministic LCG so synthetic skies are reproducible.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u8(&mut self) -> u8 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 56) as u8
    }
}

/// Interleaved RGB bytes of a noisy "sky": blue-ish with random bright blobs.
pub fn noisy_sky_rgb(width: u32, height: u32, seed: u64) -> Vec<u8> {
    let mut rng = Lcg::new(seed);
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..width * height {
        let cloud = rng.next_u8() > 180;
        let jitter = rng.next_u8() / 8;
        if cloud {
            data.extend_from_slice(&[220 + jitter / 2, 225 + jitter / 2, 230 + jitter / 2]);
        } else {
            data.extend_from_slice(&[60 + jitter, 120 + jitter, 200 + jitter]);
        }
    }
    data
}

pub fn noisy_sky(width: u32, height: u32, seed: u64) -> RasterImage {
    RasterImage::from_interleaved(width, height, ChannelLayout::Rgb, &noisy_sky_rgb(width, height, seed))
        .expect("valid buffer")
}

/// Uniform color raster.
pub fn uniform_rgb(width: u32, height: u32, rgb: [u8; 3]) -> RasterImage {
    let data: Vec<u8> = (0..width * height).flat_map(|_| rgb).collect();
    RasterImage::from_interleaved(width, height, ChannelLayout::Rgb, &data).expect("valid buffer")
}

/// Uniform gray raster.
pub fn uniform_gray(width: u32, height: u32, level: u8) -> RasterImage {
    let data = vec![level; (width * height) as usize];
    RasterImage::from_interleaved(width, height, ChannelLayout::Gray, &data).expect("valid buffer")
}

/// 0/255 checkerboard plane, (0, 0) bright.
pub fn checkerboard(height: usize, width: usize) -> Array2<u8> {
    Array2::from_shape_fn((height, width), |(r, c)| if (r + c) % 2 == 0 { 255 } else { 0 })
}

pub fn checkerboard_raster(height: usize, width: usize) -> RasterImage {
    let plane = checkerboard(height, width);
    let data: Vec<u8> = plane.iter().copied().collect();
    RasterImage::from_interleaved(width as u32, height as u32, ChannelLayout::Gray, &data).expect("valid buffer")
}

pub fn gray_frame(data: Array2<u8>) -> GrayFrame {
    GrayFrame::new(data)
}

/// Encode an RGB buffer as PNG bytes.
pub fn encode_png(width: u32, height: u32, rgb: Vec<u8>) -> Vec<u8> {
    let img = RgbImage::from_raw(width, height, rgb).expect("buffer size matches dimensions");
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
    buf.into_inner()
}
