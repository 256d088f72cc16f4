pub mod convert;
pub mod stats;

pub use convert::{rgb_to_hsv, to_grayscale, to_hsv, HueScale};
pub use stats::{color_statistics, ColorStats};
