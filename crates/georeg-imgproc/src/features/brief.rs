use georeg_raster::RasterBand;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of intensity comparisons in a descriptor (32 bytes, 256 bits).
pub const DESCRIPTOR_BITS: usize = 256;

/// Half-width of the square sampling window the test pairs are drawn from.
pub const PATCH_RADIUS: i32 = 15;

/// A 256-bit binary descriptor packed into 32 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptor(pub [u8; 32]);

impl Descriptor {
    /// Hamming distance to another descriptor (0..=256).
    #[inline]
    pub fn distance(&self, other: &Descriptor) -> u32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(&x, &y)| (x ^ y).count_ones())
            .sum()
    }
}

/// The BRIEF sampling pattern: 256 point pairs in patch coordinates.
///
/// Pairs are drawn uniformly from the sampling window with a seeded RNG, so
/// two patterns built from the same seed are identical and descriptor
/// extraction stays deterministic across runs and machines.
#[derive(Clone, Debug)]
pub struct BriefPattern {
    // (row0, col0, row1, col1) per comparison
    pairs: Vec<[i32; 4]>,
}

impl BriefPattern {
    /// Generate the pattern from a seed.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let pairs = (0..DESCRIPTOR_BITS)
            .map(|_| {
                [
                    rng.random_range(-PATCH_RADIUS..=PATCH_RADIUS),
                    rng.random_range(-PATCH_RADIUS..=PATCH_RADIUS),
                    rng.random_range(-PATCH_RADIUS..=PATCH_RADIUS),
                    rng.random_range(-PATCH_RADIUS..=PATCH_RADIUS),
                ]
            })
            .collect();
        Self { pairs }
    }
}

/// Orientation of each corner by the intensity-centroid method.
///
/// Moments are accumulated over a 31x31 disc around the corner; the angle
/// points from the corner to the patch centroid. Pixels falling outside the
/// band are skipped.
pub fn corner_orientations(src: &RasterBand<u8>, corners: &[[i32; 2]]) -> Vec<f32> {
    const M_SIZE: i32 = 31; // must be odd
    let radius = (M_SIZE - 1) / 2;
    let radius2 = radius * radius;

    let src_slice = src.as_slice();
    let height = src.rows() as i32;
    let width = src.cols() as i32;

    let mut orientations = Vec::with_capacity(corners.len());

    for &[x0, y0] in corners {
        let mut m01 = 0f32;
        let mut m10 = 0f32;

        for dr in -radius..=radius {
            let mut row_sum = 0f32;
            for dc in -radius..=radius {
                if dr * dr + dc * dc > radius2 {
                    continue;
                }

                let rr = y0 + dr;
                let cc = x0 + dc;
                if rr >= 0 && rr < height && cc >= 0 && cc < width {
                    let pixel = src_slice[(rr * width + cc) as usize] as f32;
                    m10 += pixel * dc as f32;
                    row_sum += pixel;
                }
            }
            m01 += row_sum * dr as f32;
        }
        orientations.push(m01.atan2(m10));
    }

    orientations
}

/// Steered BRIEF descriptors for a set of corners.
///
/// Each test pair is rotated by the corner orientation before sampling, so
/// the descriptor is comparable across images with different feature
/// orientations. Samples are taken from a 5x5 box-smoothed copy of the band;
/// comparisons with an out-of-bounds endpoint contribute a zero bit.
pub fn compute_descriptors(
    src: &RasterBand<u8>,
    corners: &[[i32; 2]],
    orientations: &[f32],
    pattern: &BriefPattern,
) -> Vec<Descriptor> {
    let smoothed = box_smooth_5x5(src);
    let height = src.rows() as i32;
    let width = src.cols() as i32;

    let mut descriptors = Vec::with_capacity(corners.len());

    for (&[x0, y0], &angle) in corners.iter().zip(orientations.iter()) {
        let sin_a = angle.sin();
        let cos_a = angle.cos();

        let mut bytes = [0u8; 32];
        for (byte_idx, byte) in bytes.iter_mut().enumerate() {
            let mut byte_val = 0u8;
            for bit_idx in 0..8 {
                let [pr0, pc0, pr1, pc1] = pattern.pairs[byte_idx * 8 + bit_idx];
                let (pr0, pc0, pr1, pc1) =
                    (pr0 as f32, pc0 as f32, pr1 as f32, pc1 as f32);

                let spr0 = (sin_a * pr0 + cos_a * pc0).round() as i32;
                let spc0 = (cos_a * pr0 - sin_a * pc0).round() as i32;
                let spr1 = (sin_a * pr1 + cos_a * pc1).round() as i32;
                let spc1 = (cos_a * pr1 - sin_a * pc1).round() as i32;

                let r0 = y0 + spr0;
                let c0 = x0 + spc0;
                let r1 = y0 + spr1;
                let c1 = x0 + spc1;

                let in_bounds = r0 >= 0
                    && r0 < height
                    && c0 >= 0
                    && c0 < width
                    && r1 >= 0
                    && r1 < height
                    && c1 >= 0
                    && c1 < width;
                if in_bounds {
                    let v0 = smoothed[(r0 * width + c0) as usize];
                    let v1 = smoothed[(r1 * width + c1) as usize];
                    if v0 < v1 {
                        byte_val |= 1 << bit_idx;
                    }
                }
            }
            *byte = byte_val;
        }

        descriptors.push(Descriptor(bytes));
    }

    descriptors
}

// 5x5 mean filter via a summed-area table, clamping the window at the
// borders. Smoothing before the pairwise tests is what makes BRIEF stable
// under pixel noise.
fn box_smooth_5x5(src: &RasterBand<u8>) -> Vec<f32> {
    let rows = src.rows();
    let cols = src.cols();
    let data = src.as_slice();

    // integral[(r, c)] = sum of data[0..r, 0..c]
    let mut integral = vec![0u64; (rows + 1) * (cols + 1)];
    for r in 0..rows {
        let mut row_sum = 0u64;
        for c in 0..cols {
            row_sum += data[r * cols + c] as u64;
            integral[(r + 1) * (cols + 1) + (c + 1)] =
                integral[r * (cols + 1) + (c + 1)] + row_sum;
        }
    }

    let sat = |r: usize, c: usize| integral[r * (cols + 1) + c];

    let mut out = vec![0f32; rows * cols];
    for r in 0..rows {
        let r0 = r.saturating_sub(2);
        let r1 = (r + 3).min(rows);
        for c in 0..cols {
            let c0 = c.saturating_sub(2);
            let c1 = (c + 3).min(cols);

            let sum = sat(r1, c1) + sat(r0, c0) - sat(r1, c0) - sat(r0, c1);
            let count = ((r1 - r0) * (c1 - c0)) as f32;
            out[r * cols + c] = sum as f32 / count;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use georeg_raster::RasterBand;

    fn gradient_band(size: usize, horizontal: bool) -> RasterBand<u8> {
        let denom = (size - 1).max(1) as f32;
        let data = (0..size * size)
            .map(|i| {
                let (r, c) = (i / size, i % size);
                let t = if horizontal { c } else { r } as f32 / denom;
                (t * 255.0).round() as u8
            })
            .collect();
        RasterBand::new([size, size].into(), data).unwrap()
    }

    #[test]
    fn orientation_follows_gradient() {
        let center = [[15, 15]];

        let ori_x = corner_orientations(&gradient_band(31, true), &center)[0];
        assert!(ori_x.abs() < 0.1, "expected ~0 rad, got {ori_x}");

        let ori_y = corner_orientations(&gradient_band(31, false), &center)[0].abs();
        let expected = std::f32::consts::FRAC_PI_2;
        assert!(
            (ori_y - expected).abs() < 0.1,
            "expected ~pi/2 rad, got {ori_y}"
        );
    }

    #[test]
    fn pattern_is_deterministic() {
        let a = BriefPattern::from_seed(7);
        let b = BriefPattern::from_seed(7);
        assert_eq!(a.pairs, b.pairs);

        let c = BriefPattern::from_seed(8);
        assert_ne!(a.pairs, c.pairs);
    }

    #[test]
    fn identical_patches_have_zero_distance() {
        let band = gradient_band(64, true);
        let pattern = BriefPattern::from_seed(42);
        let corners = [[25, 30], [25, 30]];
        let orientations = corner_orientations(&band, &corners);
        let descs = compute_descriptors(&band, &corners, &orientations, &pattern);
        assert_eq!(descs[0].distance(&descs[1]), 0);
    }

    #[test]
    fn different_patches_differ() {
        let horizontal = gradient_band(64, true);
        let vertical = gradient_band(64, false);
        let pattern = BriefPattern::from_seed(42);
        let corners = [[30, 30]];

        // fix the orientation so the descriptors compare raw appearance
        let descs_h = compute_descriptors(&horizontal, &corners, &[0.0], &pattern);
        let descs_v = compute_descriptors(&vertical, &corners, &[0.0], &pattern);
        assert!(descs_h[0].distance(&descs_v[0]) > 0);
    }

    #[test]
    fn smoothing_preserves_flat_regions() {
        let band = RasterBand::from_size_val([10, 10].into(), 80u8);
        let smoothed = box_smooth_5x5(&band);
        assert!(smoothed.iter().all(|&v| (v - 80.0).abs() < 1e-3));
    }
}
