use thiserror::Error;

#[derive(Error, Debug)]
pub enum NimbusError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image load error: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Raw buffer holds {actual} bytes, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("Image {width}x{height} is too small for texture analysis (needs at least 3x3)")]
    DegenerateInput { width: u32, height: u32 },

    #[error("Gray frame is {gray:?} but HSV planes are {hue:?}/{saturation:?}/{value:?} (rows, cols)")]
    FrameShapeMismatch {
        gray: (usize, usize),
        hue: (usize, usize),
        saturation: (usize, usize),
        value: (usize, usize),
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl NimbusError {
    /// True for failures that mean the frame itself is unusable (decode
    /// failure or empty raster), as opposed to a bad configuration.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::ImageLoad(_) | Self::InvalidDimensions { .. } | Self::InvalidBuffer { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, NimbusError>;
