/// Default uniform downsample ratio applied before any analysis.
pub const DEFAULT_DOWNSAMPLE_RATIO: f64 = 0.4;

/// Default Canny low (candidate) threshold on the 0-255 gradient scale.
pub const DEFAULT_CANNY_LOW_THRESHOLD: f32 = 100.0;

/// Default Canny high (seed) threshold on the 0-255 gradient scale.
pub const DEFAULT_CANNY_HIGH_THRESHOLD: f32 = 200.0;

/// Default gray level above which a pixel counts as cloud.
pub const DEFAULT_CLOUD_BRIGHTNESS_THRESHOLD: u8 = 200;

/// Canonical capture size used by the station's camera script.
pub const STATION_CAPTURE_SIZE: [u32; 2] = [256, 256];

/// Regularizer inside the logarithm of the LBP entropy sum.
pub const LBP_ENTROPY_EPSILON: f64 = 1e-10;

/// Smallest width/height with at least one interior pixel.
pub const MIN_TEXTURE_DIMENSION: u32 = 3;

/// Neighbor visitation order for LBP codes, as (row, col) offsets.
/// The first entry maps to the most significant bit.
pub const LBP_NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Number of channels in a color raster.
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// tan(22.5 deg) in Q15 fixed point, used for Canny direction binning.
pub const CANNY_TAN_22_5_Q15: i64 = 13_573;

/// Fixed-point shift matching [`CANNY_TAN_22_5_Q15`].
pub const CANNY_FIXED_SHIFT: u32 = 15;

/// Minimum frame count to fan a batch out across the Rayon pool.
pub const PARALLEL_FRAME_THRESHOLD: usize = 2;
