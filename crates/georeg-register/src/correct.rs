use georeg_imgproc::interpolation::InterpolationMode;
use georeg_imgproc::warp::{translation_matrix, warp_affine};
use georeg_raster::RasterBand;

use crate::matcher::MatchCandidate;

/// Pixel offset implied by a selected match: `target - source`.
pub fn translation_offset(best_match: &MatchCandidate) -> (i32, i32) {
    (best_match.shift[0], best_match.shift[1])
}

/// Resample the target band onto the reference grid using the selected
/// match.
///
/// The candidate's shift measures how far the target content sits from the
/// reference, so the correction translates the content back by that
/// amount: output pixel (x, y) samples the input at (x + dx, y + dy). The
/// output has the same dimensions as the input; pixels shifted in from
/// outside are filled with 0.0. Geotransform and projection metadata are
/// untouched, persisting them correctly is the caller's job.
///
/// A zero shift returns a pixel-identical band.
pub fn correct_band(
    band: &RasterBand<f32>,
    best_match: &MatchCandidate,
    interpolation: InterpolationMode,
) -> RasterBand<f32> {
    let (dx, dy) = translation_offset(best_match);

    let mut corrected = RasterBand::from_size_val(band.size(), 0.0);
    warp_affine(
        band,
        &mut corrected,
        &translation_matrix(-dx as f32, -dy as f32),
        interpolation,
    );

    corrected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shifted_match(dx: i32, dy: i32) -> MatchCandidate {
        let sx = 10u32;
        let sy = 10u32;
        MatchCandidate::new(
            [sx, sy],
            [(sx as i32 + dx) as u32, (sy as i32 + dy) as u32],
            0,
        )
    }

    fn numbered_band(cols: usize, rows: usize) -> RasterBand<f32> {
        RasterBand::new(
            [cols, rows].into(),
            (0..cols * rows).map(|i| i as f32 + 1.0).collect(),
        )
        .unwrap()
    }

    #[test]
    fn zero_shift_is_identity() {
        let band = numbered_band(5, 4);
        let corrected = correct_band(&band, &shifted_match(0, 0), InterpolationMode::Nearest);
        assert_eq!(corrected.as_slice(), band.as_slice());
    }

    #[test]
    fn positive_shift_pulls_content_back() {
        let band = numbered_band(3, 3);
        // content drifted by (+1, +1): correction samples at (x+1, y+1)
        let corrected = correct_band(&band, &shifted_match(1, 1), InterpolationMode::Nearest);
        #[rustfmt::skip]
        let expected = [
            5.0, 6.0, 0.0,
            8.0, 9.0, 0.0,
            0.0, 0.0, 0.0,
        ];
        assert_eq!(corrected.as_slice(), &expected);
    }

    #[test]
    fn negative_shift_pushes_content_forward() {
        let band = numbered_band(3, 3);
        let corrected = correct_band(&band, &shifted_match(-1, 0), InterpolationMode::Nearest);
        #[rustfmt::skip]
        let expected = [
            0.0, 1.0, 2.0,
            0.0, 4.0, 5.0,
            0.0, 7.0, 8.0,
        ];
        assert_eq!(corrected.as_slice(), &expected);
    }

    #[test]
    fn correct_then_uncorrect_round_trips_interior() {
        let band = numbered_band(6, 6);
        let corrected = correct_band(&band, &shifted_match(2, 1), InterpolationMode::Bilinear);
        // invert the offset by swapping source and target
        let inverse = MatchCandidate::new([12, 11], [10, 10], 0);
        let restored = correct_band(&corrected, &inverse, InterpolationMode::Bilinear);

        for y in 0..6usize {
            for x in 0..6usize {
                let original = band.as_slice()[y * 6 + x];
                let value = restored.as_slice()[y * 6 + x];
                // the strip exposed by the shift is exactly the fill value
                if x < 2 || y < 1 {
                    assert_eq!(value, 0.0, "expected fill at ({x}, {y})");
                } else {
                    assert_eq!(value, original, "mismatch at ({x}, {y})");
                }
            }
        }
    }
}
