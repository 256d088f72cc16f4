use ndarray::Array2;

/// Clamped indexing, replicating the outermost row/column.
#[inline]
fn px(data: &Array2<u8>, row: isize, col: isize) -> i32 {
    let (h, w) = data.dim();
    let r = row.clamp(0, h as isize - 1) as usize;
    let c = col.clamp(0, w as isize - 1) as usize;
    data[[r, c]] as i32
}

/// 3x3 Sobel derivatives with replicated borders.
///
/// Kernels:
///   Gx = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]]
///   Gy = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]]
///
/// Returns `(dx, dy)` with the same shape as the input.
pub fn sobel_derivatives(data: &Array2<u8>) -> (Array2<i32>, Array2<i32>) {
    let (h, w) = data.dim();
    let mut dx = Array2::<i32>::zeros((h, w));
    let mut dy = Array2::<i32>::zeros((h, w));

    for row in 0..h {
        for col in 0..w {
            let (r, c) = (row as isize, col as isize);
            let tl = px(data, r - 1, c - 1);
            let tc = px(data, r - 1, c);
            let tr = px(data, r - 1, c + 1);
            let ml = px(data, r, c - 1);
            let mr = px(data, r, c + 1);
            let bl = px(data, r + 1, c - 1);
            let bc = px(data, r + 1, c);
            let br = px(data, r + 1, c + 1);

            dx[[row, col]] = (tr + 2 * mr + br) - (tl + 2 * ml + bl);
            dy[[row, col]] = (bl + 2 * bc + br) - (tl + 2 * tc + tr);
        }
    }

    (dx, dy)
}

/// L1 gradient magnitude `|dx| + |dy|`.
pub fn l1_magnitude(dx: &Array2<i32>, dy: &Array2<i32>) -> Array2<i32> {
    let mut mag = dx.mapv(i32::abs);
    mag.zip_mut_with(dy, |m, &d| *m += d.abs());
    mag
}
