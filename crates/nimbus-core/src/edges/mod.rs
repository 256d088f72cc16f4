pub mod canny;
pub mod sobel;

use ndarray::Array2;

pub use canny::{canny, count_edges, detect_edges};

/// Binary edge map: 255 on edges, 0 elsewhere. Same shape as the input.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeMap {
    pub data: Array2<u8>,
}

impl EdgeMap {
    /// Number of pixels marked as edges.
    pub fn edge_count(&self) -> u64 {
        self.data.iter().filter(|&&v| v != 0).count() as u64
    }
}
