pub mod lbp;
pub mod stats;

pub use lbp::{compute_lbp, lbp_code};
pub use stats::{describe_lbp, describe_texture, lbp_entropy, lbp_mean_stddev, texture_stats, TextureStats};
