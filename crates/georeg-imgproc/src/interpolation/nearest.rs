use georeg_raster::RasterBand;

/// Kernel for nearest neighbor interpolation
///
/// Callers guarantee (u, v) lies within the band bounds.
pub(crate) fn nearest_neighbor_interpolation(band: &RasterBand<f32>, u: f32, v: f32) -> f32 {
    let (rows, cols) = (band.rows(), band.cols());

    let iu = (u.round() as usize).min(cols - 1);
    let iv = (v.round() as usize).min(rows - 1);

    band.as_slice()[iv * cols + iu]
}
