use georeg_raster::RasterBand;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

// Corner with its score, kept ordered for the NMS heap.
#[derive(Copy, Clone, Eq, PartialEq)]
struct ScoredCorner {
    score: i32,
    x: usize,
    y: usize,
}

impl Ord for ScoredCorner {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score)
    }
}

impl PartialOrd for ScoredCorner {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// FAST corner detector over an 8-bit band.
///
/// Runs the segment test on the 16-pixel Bresenham circle: a pixel is a
/// corner when at least `arc_length` consecutive circle pixels are all
/// brighter or all darker than the center by more than `threshold`. Corners
/// are scored with the sum of absolute differences over the qualifying arc
/// and optionally thinned with 3x3 non-maximum suppression.
///
/// # Arguments
///
/// * `src` - The source band, 8-bit single channel.
/// * `threshold` - Minimum center/circle intensity difference.
/// * `arc_length` - Required number of consecutive qualifying circle pixels.
/// * `nms` - Whether to apply non-maximum suppression.
///
/// # Returns
///
/// Detected corner coordinates as `[x, y]`, i.e. (col, row).
pub fn fast_corner_detector(
    src: &RasterBand<u8>,
    threshold: u8,
    arc_length: u8,
    nms: bool,
) -> Vec<[i32; 2]> {
    let (cols, rows) = (src.cols() as i32, src.rows() as i32);

    // Offsets of the 16-pixel Bresenham circle of radius 3.
    let offsets = [
        -3 * cols,
        -3 * cols + 1,
        -2 * cols + 2,
        -cols + 3,
        3,
        cols + 3,
        2 * cols + 2,
        3 * cols + 1,
        3 * cols,
        3 * cols - 1,
        2 * cols - 2,
        cols - 3,
        -3,
        -cols - 3,
        -2 * cols - 2,
        -3 * cols - 1,
    ];

    let (corners, scores): (Vec<[i32; 2]>, Vec<i32>) = (3..rows - 3)
        .into_par_iter()
        .flat_map(|y| {
            let row_start_idx = y * cols;
            let mut row_corners = Vec::new();
            let mut row_scores = Vec::new();

            for x in 3..cols - 3 {
                let (is_corner, score) =
                    fast_corner_score(src.as_slice(), row_start_idx + x, &offsets, threshold, arc_length);
                if is_corner {
                    row_corners.push([x, y]);
                    row_scores.push(score);
                }
            }

            (row_corners, row_scores)
        })
        .unzip();

    if !nms {
        return corners;
    }

    let mut heap = BinaryHeap::with_capacity(corners.len());
    for (point, score) in corners.into_iter().zip(scores) {
        heap.push(ScoredCorner {
            score,
            x: point[0] as usize,
            y: point[1] as usize,
        });
    }

    let mut suppressed = vec![false; (rows * cols) as usize];
    let mut kept = Vec::new();
    while let Some(point) = heap.pop() {
        let idx = point.y * cols as usize + point.x;
        if suppressed[idx] {
            continue;
        }

        kept.push([point.x as i32, point.y as i32]);

        for dy in -1..=1i32 {
            for dx in -1..=1i32 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = point.x as i32 + dx;
                let ny = point.y as i32 + dy;
                suppressed[(ny * cols + nx) as usize] = true;
            }
        }
    }

    kept
}

/// Segment test plus SAD score for a single pixel.
///
/// Returns `(is_corner, score)`; the score is the sum of absolute
/// differences over the qualifying arc, reduced by the threshold per pixel.
fn fast_corner_score(
    src: &[u8],
    pixel_idx: i32,
    offsets: &[i32; 16],
    threshold: u8,
    arc_length: u8,
) -> (bool, i32) {
    let center = src[pixel_idx as usize];
    let lower = center.saturating_sub(threshold);
    let upper = center.saturating_add(threshold);

    let circle: [u8; 16] = std::array::from_fn(|i| src[(pixel_idx + offsets[i]) as usize]);

    // High-speed rejection on the four compass pixels: a qualifying arc of
    // length >= 12 covers at least three of them, an arc of length >= 9
    // covers at least two.
    if arc_length >= 9 {
        let brighter = (circle[0] > upper) as u8
            + (circle[4] > upper) as u8
            + (circle[8] > upper) as u8
            + (circle[12] > upper) as u8;
        let darker = (circle[0] < lower) as u8
            + (circle[4] < lower) as u8
            + (circle[8] < lower) as u8
            + (circle[12] < lower) as u8;
        let required = if arc_length >= 12 { 3 } else { 2 };
        if brighter < required && darker < required {
            return (false, 0);
        }
    }

    // Walk the circle twice so arcs wrapping past index 15 are seen.
    let mut best_score = 0i32;
    let mut consecutive_brighter = 0u8;
    let mut consecutive_darker = 0u8;
    let mut arc_score = 0i32;
    let mut is_corner = false;

    for i in 0..32 {
        let pixel = circle[i % 16];
        if pixel > upper {
            if consecutive_brighter == 0 {
                arc_score = 0;
            }
            consecutive_brighter += 1;
            consecutive_darker = 0;
            arc_score += (pixel - upper) as i32;
            if consecutive_brighter >= arc_length {
                is_corner = true;
                best_score = best_score.max(arc_score);
            }
        } else if pixel < lower {
            if consecutive_darker == 0 {
                arc_score = 0;
            }
            consecutive_darker += 1;
            consecutive_brighter = 0;
            arc_score += (lower - pixel) as i32;
            if consecutive_darker >= arc_length {
                is_corner = true;
                best_score = best_score.max(arc_score);
            }
        } else {
            consecutive_brighter = 0;
            consecutive_darker = 0;
            arc_score = 0;
        }
    }

    (is_corner, best_score)
}
