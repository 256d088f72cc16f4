use std::path::Path;

use image::{GrayImage, ImageFormat, ImageReader, Luma};
use ndarray::Array2;
use tracing::debug;

use crate::edges::EdgeMap;
use crate::error::Result;
use crate::frame::{GrayFrame, LbpFrame, RasterImage};

/// Load and decode an image file into a raster.
///
/// The format is guessed from the file contents, not the extension, so
/// captures saved under the wrong suffix still decode.
pub fn load_raster(path: &Path) -> Result<RasterImage> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    debug!(path = %path.display(), width = img.width(), height = img.height(), "Decoded image");
    RasterImage::from_dynamic(img)
}

/// Decode an encoded image (JPEG, PNG, ...) held in memory.
pub fn decode_raster(bytes: &[u8]) -> Result<RasterImage> {
    let img = image::load_from_memory(bytes)?;
    RasterImage::from_dynamic(img)
}

fn plane_to_image(data: &Array2<u8>) -> GrayImage {
    let (h, w) = data.dim();
    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            img.put_pixel(col as u32, row as u32, Luma([data[[row, col]]]));
        }
    }
    img
}

/// Save an 8-bit plane as grayscale PNG.
pub fn save_plane_png(data: &Array2<u8>, path: &Path) -> Result<()> {
    plane_to_image(data).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save the grayscale working frame as PNG.
pub fn save_gray_png(frame: &GrayFrame, path: &Path) -> Result<()> {
    save_plane_png(&frame.data, path)
}

/// Save the LBP code map as PNG (codes map directly to gray levels).
pub fn save_lbp_png(lbp: &LbpFrame, path: &Path) -> Result<()> {
    save_plane_png(&lbp.data, path)
}

/// Save a binary edge map as PNG (edges white).
pub fn save_edge_png(edges: &EdgeMap, path: &Path) -> Result<()> {
    save_plane_png(&edges.data, path)
}
