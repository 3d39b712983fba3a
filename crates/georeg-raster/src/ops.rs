use crate::band::RasterBand;

/// Build a validity mask for a band, marking every sample equal to the
/// nodata value as invalid.
///
/// Returns one flag per sample in row-major order; `true` means the pixel
/// holds usable data. Feed this to the keypoint extractor so features are
/// never anchored on fill pixels.
pub fn nodata_mask<T>(band: &RasterBand<T>, nodata: T) -> Vec<bool>
where
    T: PartialEq + Copy,
{
    band.as_slice().iter().map(|&v| v != nodata).collect()
}

/// Rescale a floating-point band to 8 bits with min/max normalization.
///
/// The extractor requires quantized 8-bit input; this maps the band's value
/// range onto [0, 255]. A constant band maps to all zeros.
pub fn rescale_to_u8(band: &RasterBand<f32>) -> RasterBand<u8> {
    let src = band.as_slice();

    let mut min_val = f32::INFINITY;
    let mut max_val = f32::NEG_INFINITY;
    for &v in src {
        min_val = min_val.min(v);
        max_val = max_val.max(v);
    }

    let range = max_val - min_val;
    let scale = if range > 0.0 { 255.0 / range } else { 0.0 };

    let data = src
        .iter()
        .map(|&v| ((v - min_val) * scale).round().clamp(0.0, 255.0) as u8)
        .collect();

    RasterBand::new(band.size(), data).expect("rescaling preserves the sample count")
}
