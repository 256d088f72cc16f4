use ndarray::Array2;

use crate::frame::HsvFrame;

/// Per-channel means of an HSV frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStats {
    pub hue_mean: f64,
    pub saturation_mean: f64,
    pub value_mean: f64,
}

/// Arithmetic mean of an 8-bit plane. Empty planes average to 0.
pub fn plane_mean(data: &Array2<u8>) -> f64 {
    let n = data.len();
    if n == 0 {
        return 0.0;
    }
    let sum: u64 = data.iter().map(|&v| v as u64).sum();
    sum as f64 / n as f64
}

/// Unweighted mean of each HSV channel over every pixel.
pub fn color_statistics(hsv: &HsvFrame) -> ColorStats {
    ColorStats {
        hue_mean: plane_mean(&hsv.hue),
        saturation_mean: plane_mean(&hsv.saturation),
        value_mean: plane_mean(&hsv.value),
    }
}
