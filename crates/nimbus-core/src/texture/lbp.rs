use ndarray::Array2;

use crate::consts::LBP_NEIGHBOR_OFFSETS;
use crate::frame::{GrayFrame, LbpFrame};

/// LBP code of the interior pixel at (row, col).
///
/// Each neighbor strictly brighter than the center sets one bit; neighbors
/// are visited in [`LBP_NEIGHBOR_OFFSETS`] order, first one in the MSB.
/// The caller guarantees a full 3x3 neighborhood.
#[inline]
pub fn lbp_code(data: &Array2<u8>, row: usize, col: usize) -> u8 {
    let center = data[[row, col]];
    LBP_NEIGHBOR_OFFSETS.iter().fold(0u8, |code, &(dr, dc)| {
        let r = (row as isize + dr) as usize;
        let c = (col as isize + dc) as usize;
        (code << 1) | u8::from(data[[r, c]] > center)
    })
}

/// Compute the 8-neighbor Local Binary Pattern image.
///
/// The output has the same shape as the input. Border pixels have no full
/// neighborhood and stay 0; frames narrower than 3 pixels in either axis
/// come back all zero.
pub fn compute_lbp(gray: &GrayFrame) -> LbpFrame {
    let (h, w) = gray.data.dim();
    let mut data = Array2::<u8>::zeros((h, w));

    if h < 3 || w < 3 {
        return LbpFrame { data };
    }

    for row in 1..h - 1 {
        for col in 1..w - 1 {
            data[[row, col]] = lbp_code(&gray.data, row, col);
        }
    }

    LbpFrame { data }
}
