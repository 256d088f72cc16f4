pub mod color;
pub mod consts;
pub mod coverage;
pub mod edges;
pub mod error;
pub mod features;
pub mod frame;
pub mod io;
pub mod pipeline;
pub mod preprocess;
pub mod record;
pub mod texture;

pub use error::{NimbusError, Result};
pub use features::FeatureVector;
pub use frame::{ChannelLayout, GrayFrame, HsvFrame, LbpFrame, RasterImage};
pub use pipeline::config::PipelineConfig;
pub use pipeline::{extract_features, extract_features_from_bytes, extract_features_from_path};
