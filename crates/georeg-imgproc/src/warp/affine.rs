use georeg_raster::RasterBand;
use rayon::prelude::*;

use crate::interpolation::{interpolate_pixel, InterpolationMode};

/// Inverts a 2x3 affine transformation matrix.
///
/// A singular matrix inverts to the zero matrix, following the OpenCV
/// convention.
///
/// # Arguments
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// # Returns
///
/// The inverted 2x3 affine transformation matrix.
pub fn invert_affine_transform(m: &[f32; 6]) -> [f32; 6] {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    [new_a, new_b, new_c, new_d, new_e, new_f]
}

/// 2x3 matrix for a pure translation by (tx, ty) pixels.
pub fn translation_matrix(tx: f32, ty: f32) -> [f32; 6] {
    [1.0, 0.0, tx, 0.0, 1.0, ty]
}

/// Applies an affine transformation to a point.
fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to a band.
///
/// Destination pixels are mapped back through the inverse transform and
/// interpolated from the source. Pixels whose source position falls outside
/// the band are left untouched, so pre-fill `dst` with the intended border
/// value.
///
/// # Arguments
///
/// * `src` - The input band.
/// * `dst` - The output band; may differ in size from `src`.
/// * `m` - The 2x3 affine transformation matrix mapping src to dst.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use georeg_raster::RasterBand;
/// use georeg_imgproc::interpolation::InterpolationMode;
/// use georeg_imgproc::warp::{translation_matrix, warp_affine};
///
/// let src = RasterBand::new([2, 2].into(), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let mut dst = RasterBand::from_size_val([2, 2].into(), 0.0);
///
/// warp_affine(&src, &mut dst, &translation_matrix(1.0, 0.0), InterpolationMode::Nearest);
/// assert_eq!(dst.as_slice(), &[0.0, 1.0, 0.0, 3.0]);
/// ```
pub fn warp_affine(
    src: &RasterBand<f32>,
    dst: &mut RasterBand<f32>,
    m: &[f32; 6],
    interpolation: InterpolationMode,
) {
    // invert the transform to find the source position of each dst pixel
    let m_inv = invert_affine_transform(m);

    let src_cols = src.cols() as f32;
    let src_rows = src.rows() as f32;
    let dst_cols = dst.cols();

    dst.as_slice_mut()
        .par_chunks_mut(dst_cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (x, dst_pixel) in dst_row.iter_mut().enumerate() {
                let (u, v) = transform_point(x as f32, y as f32, &m_inv);
                if u >= 0.0 && u < src_cols && v >= 0.0 && v < src_rows {
                    *dst_pixel = interpolate_pixel(src, u, v, interpolation);
                }
            }
        });
}
