use georeg_raster::{RasterBand, RasterError};

use super::brief::{compute_descriptors, corner_orientations, BriefPattern, Descriptor};
use super::fast::fast_corner_detector;

/// A detected feature: sub-pixel location, scale, orientation and the
/// binary descriptor of its neighborhood.
#[derive(Clone, Copy, Debug)]
pub struct Keypoint {
    /// Column position in pixels.
    pub x: f32,
    /// Row position in pixels.
    pub y: f32,
    /// Detection scale. Detection is single-scale, so this is 1.0.
    pub scale: f32,
    /// Patch orientation in radians.
    pub orientation: f32,
    /// Binary appearance descriptor.
    pub descriptor: Descriptor,
}

/// FAST + steered-BRIEF keypoint extractor.
///
/// The input band must be 8-bit; quantize higher bit depths with
/// `georeg_raster::ops::rescale_to_u8` before calling. Extraction is a pure
/// function of the band, the mask and this configuration.
#[derive(Clone, Debug)]
pub struct KeypointExtractor {
    /// FAST center/circle intensity threshold.
    pub threshold: u8,
    /// FAST segment-test arc length.
    pub arc_length: u8,
    /// Whether to thin corners with non-maximum suppression.
    pub nms: bool,
    /// Keypoints closer than this to the band edge are discarded so the
    /// descriptor patch stays inside the band.
    pub border: i32,
    /// Seed for the BRIEF sampling pattern. Both images of a pair must use
    /// the same seed for their descriptors to be comparable.
    pub pattern_seed: u64,
}

impl Default for KeypointExtractor {
    fn default() -> Self {
        Self {
            threshold: 20,
            arc_length: 9,
            nms: true,
            border: 19,
            pattern_seed: 0xb41f,
        }
    }
}

impl KeypointExtractor {
    /// Create an extractor with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect and describe keypoints in a band.
    ///
    /// # Arguments
    ///
    /// * `band` - 8-bit single-channel band.
    /// * `mask` - Optional validity mask, one flag per pixel in row-major
    ///   order; keypoints landing on a `false` pixel are dropped.
    ///
    /// # Returns
    ///
    /// The detected keypoints. An empty vector is a valid outcome, not an
    /// error; featureless inputs simply produce no candidates downstream.
    ///
    /// # Errors
    ///
    /// Returns an error when the mask length does not match the band size.
    pub fn extract(
        &self,
        band: &RasterBand<u8>,
        mask: Option<&[bool]>,
    ) -> Result<Vec<Keypoint>, RasterError> {
        if let Some(mask) = mask {
            if mask.len() != band.size().numel() {
                return Err(RasterError::MaskSizeMismatch(
                    mask.len(),
                    band.size().numel(),
                ));
            }
        }

        let mut corners = fast_corner_detector(band, self.threshold, self.arc_length, self.nms);

        let cols = band.cols();
        if let Some(mask) = mask {
            corners.retain(|&[x, y]| mask[y as usize * cols + x as usize]);
        }
        corners.retain(|&[x, y]| self.within_border(band, x, y));

        if corners.is_empty() {
            return Ok(Vec::new());
        }

        let orientations = corner_orientations(band, &corners);
        let pattern = BriefPattern::from_seed(self.pattern_seed);
        let descriptors = compute_descriptors(band, &corners, &orientations, &pattern);

        let keypoints = corners
            .iter()
            .zip(orientations.iter())
            .zip(descriptors.iter())
            .map(|((&[x, y], &orientation), &descriptor)| Keypoint {
                x: x as f32,
                y: y as f32,
                scale: 1.0,
                orientation,
                descriptor,
            })
            .collect();

        Ok(keypoints)
    }

    fn within_border(&self, band: &RasterBand<u8>, x: i32, y: i32) -> bool {
        let rows = band.rows() as i32;
        let cols = band.cols() as i32;
        x >= self.border && x < cols - self.border && y >= self.border && y < rows - self.border
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use georeg_raster::ops::nodata_mask;

    // 64x64 dark background with a bright square whose corners are FAST
    // features well inside the descriptor border.
    fn band_with_square(x0: usize, y0: usize, side: usize) -> RasterBand<u8> {
        let mut band = RasterBand::from_size_val([64, 64].into(), 30u8);
        let cols = band.cols();
        let data = band.as_slice_mut();
        for r in y0..y0 + side {
            for c in x0..x0 + side {
                data[r * cols + c] = 220;
            }
        }
        band
    }

    #[test]
    fn finds_square_corners() -> Result<(), RasterError> {
        let band = band_with_square(26, 26, 12);
        let extractor = KeypointExtractor::new();
        let keypoints = extractor.extract(&band, None)?;
        assert!(
            keypoints.len() >= 4,
            "expected at least 4 corners, got {}",
            keypoints.len()
        );

        // every keypoint sits on or next to the square's outline
        for kp in &keypoints {
            let (x, y) = (kp.x as i32, kp.y as i32);
            assert!((25..=38).contains(&x), "keypoint x out of range: {x}");
            assert!((25..=38).contains(&y), "keypoint y out of range: {y}");
        }
        Ok(())
    }

    #[test]
    fn flat_band_yields_empty() -> Result<(), RasterError> {
        let band = RasterBand::from_size_val([64, 64].into(), 100u8);
        let keypoints = KeypointExtractor::new().extract(&band, None)?;
        assert!(keypoints.is_empty());
        Ok(())
    }

    #[test]
    fn mask_excludes_nodata_features() -> Result<(), RasterError> {
        let band = band_with_square(26, 26, 12);
        let extractor = KeypointExtractor::new();

        let keypoints = extractor.extract(&band, None)?;
        assert!(!keypoints.is_empty());

        // mark the square region invalid; its corners must vanish
        let mut mask = vec![true; 64 * 64];
        for r in 20..44 {
            for c in 20..44 {
                mask[r * 64 + c] = false;
            }
        }
        let masked = extractor.extract(&band, Some(&mask))?;
        assert!(masked.is_empty());
        Ok(())
    }

    #[test]
    fn nodata_mask_integrates() -> Result<(), RasterError> {
        let band = band_with_square(26, 26, 12);
        // nodata value does not occur, so the mask is all-valid
        let mask = nodata_mask(&band, 0u8);
        let keypoints = KeypointExtractor::new().extract(&band, Some(&mask))?;
        assert!(!keypoints.is_empty());
        Ok(())
    }

    #[test]
    fn mask_shape_mismatch_is_rejected() {
        let band = RasterBand::from_size_val([8, 8].into(), 0u8);
        let mask = vec![true; 10];
        let result = KeypointExtractor::new().extract(&band, Some(&mask));
        assert!(matches!(result, Err(RasterError::MaskSizeMismatch(10, 64))));
    }
}
