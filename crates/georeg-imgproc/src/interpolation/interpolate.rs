use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use georeg_raster::RasterBand;

/// Interpolation mode for resampling operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Kernel for interpolating a sample value
///
/// # Arguments
///
/// * `band` - The input band.
/// * `u` - The x coordinate of the sample to interpolate.
/// * `v` - The y coordinate of the sample to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated sample value.
pub fn interpolate_pixel(
    band: &RasterBand<f32>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
) -> f32 {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(band, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(band, u, v),
    }
}
