use ndarray::Array2;

use crate::consts::{CANNY_FIXED_SHIFT, CANNY_TAN_22_5_Q15};
use crate::frame::GrayFrame;
use crate::pipeline::config::EdgeConfig;

use super::sobel::{l1_magnitude, sobel_derivatives};
use super::EdgeMap;

/// Non-maximum suppression state per pixel.
const WEAK: u8 = 0;
const SUPPRESSED: u8 = 1;
const STRONG: u8 = 2;

/// Magnitude lookup with zero outside the image.
#[inline]
fn mag_at(mag: &Array2<i32>, row: isize, col: isize) -> i32 {
    let (h, w) = mag.dim();
    if row < 0 || col < 0 || row >= h as isize || col >= w as isize {
        0
    } else {
        mag[[row as usize, col as usize]]
    }
}

/// Whether `m` at (row, col) is a local maximum along its gradient direction.
///
/// The direction is binned into horizontal, vertical or one of the two
/// diagonals using tan(22.5) / tan(67.5) boundaries in Q15 fixed point.
/// On a plateau the earlier pixel along the scan wins, so ties keep one pixel.
fn is_local_max(mag: &Array2<i32>, row: isize, col: isize, dx: i32, dy: i32) -> bool {
    let m = mag_at(mag, row, col);
    let x = (dx as i64).abs();
    let y = (dy as i64).abs() << CANNY_FIXED_SHIFT;
    let tg22x = x * CANNY_TAN_22_5_Q15;

    if y < tg22x {
        m > mag_at(mag, row, col - 1) && m >= mag_at(mag, row, col + 1)
    } else {
        let tg67x = tg22x + (x << (CANNY_FIXED_SHIFT + 1));
        if y > tg67x {
            m > mag_at(mag, row - 1, col) && m >= mag_at(mag, row + 1, col)
        } else {
            let s: isize = if (dx ^ dy) < 0 { -1 } else { 1 };
            m > mag_at(mag, row - 1, col - s) && m > mag_at(mag, row + 1, col + s)
        }
    }
}

/// Two-threshold Canny edge detection on an 8-bit plane.
///
/// Uses 3x3 Sobel derivatives and the L1 magnitude `|dx| + |dy|`. A pixel
/// that survives non-maximum suppression is a candidate when its magnitude
/// is above `low` and seeds an edge when it is above `high`; candidates
/// 8-connected to a seed are kept.
pub fn canny(data: &Array2<u8>, low: f32, high: f32) -> EdgeMap {
    let (h, w) = data.dim();
    let low = low.floor() as i32;
    let high = high.floor() as i32;

    let (dx, dy) = sobel_derivatives(data);
    let mag = l1_magnitude(&dx, &dy);

    let mut state = Array2::<u8>::from_elem((h, w), SUPPRESSED);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for row in 0..h {
        for col in 0..w {
            let m = mag[[row, col]];
            if m <= low {
                continue;
            }
            if !is_local_max(&mag, row as isize, col as isize, dx[[row, col]], dy[[row, col]]) {
                continue;
            }
            if m > high {
                state[[row, col]] = STRONG;
                stack.push((row, col));
            } else {
                state[[row, col]] = WEAK;
            }
        }
    }

    // Hysteresis: grow strong edges into 8-connected weak candidates.
    while let Some((row, col)) = stack.pop() {
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = row as isize + dr;
                let c = col as isize + dc;
                if r < 0 || c < 0 || r >= h as isize || c >= w as isize {
                    continue;
                }
                let (r, c) = (r as usize, c as usize);
                if state[[r, c]] == WEAK {
                    state[[r, c]] = STRONG;
                    stack.push((r, c));
                }
            }
        }
    }

    EdgeMap {
        data: state.mapv(|s| if s == STRONG { 255 } else { 0 }),
    }
}

/// Run Canny on the grayscale frame with the configured thresholds.
pub fn detect_edges(gray: &GrayFrame, config: &EdgeConfig) -> EdgeMap {
    canny(&gray.data, config.low_threshold, config.high_threshold)
}

/// Number of edge pixels in the grayscale frame.
pub fn count_edges(gray: &GrayFrame, config: &EdgeConfig) -> u64 {
    detect_edges(gray, config).edge_count()
}
