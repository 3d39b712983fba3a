use georeg_imgproc::features::Keypoint;

/// A candidate correspondence between a source and a target keypoint.
///
/// The shift attributes are derived once at construction and drive the
/// consensus selection: true co-registration offsets agree in both shift
/// angle and shift magnitude, spurious matches scatter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchCandidate {
    /// Source pixel position (col, row).
    pub source: [u32; 2],
    /// Target pixel position (col, row).
    pub target: [u32; 2],
    /// Descriptor distance of the pairing.
    pub distance: u32,
    /// Shift vector target - source in pixels.
    pub shift: [i32; 2],
    /// Euclidean norm of the shift vector.
    pub magnitude: f32,
    /// Undirected shift angle in degrees, folded into [0, 180).
    ///
    /// A shift and its negation describe the same physical offset, so both
    /// fold onto one angle. A zero shift has angle 0.
    pub angle: f32,
}

impl MatchCandidate {
    /// Build a candidate from pixel positions, deriving the shift
    /// attributes.
    pub fn new(source: [u32; 2], target: [u32; 2], distance: u32) -> Self {
        let dx = target[0] as i32 - source[0] as i32;
        let dy = target[1] as i32 - source[1] as i32;
        let magnitude = ((dx * dx + dy * dy) as f32).sqrt();
        let angle = (dy as f32)
            .atan2(dx as f32)
            .to_degrees()
            .rem_euclid(180.0);

        Self {
            source,
            target,
            distance,
            shift: [dx, dy],
            magnitude,
            angle,
        }
    }
}

/// Strategy for pairing descriptors between two keypoint sets.
///
/// The selector only ever sees [`MatchCandidate`]s, so a stricter pairing
/// policy can be swapped in without touching the consensus logic.
pub trait MatchingPolicy {
    /// Pair keypoints, returning `(source_idx, target_idx, distance)`
    /// triples with distance at most `max_distance`, at most one per source
    /// keypoint, in source order.
    fn pair(
        &self,
        source: &[Keypoint],
        target: &[Keypoint],
        max_distance: u32,
    ) -> Vec<(usize, usize, u32)>;
}

/// One-directional nearest-neighbor pairing.
///
/// Each source keypoint takes its closest target descriptor with no
/// reverse consistency check. This mirrors the classic brute-force matcher
/// behavior; it is cheap but admits many-to-one pairings, which the
/// downstream consensus clustering is there to absorb.
#[derive(Clone, Copy, Debug, Default)]
pub struct NearestNeighbor;

impl MatchingPolicy for NearestNeighbor {
    fn pair(
        &self,
        source: &[Keypoint],
        target: &[Keypoint],
        max_distance: u32,
    ) -> Vec<(usize, usize, u32)> {
        let mut pairs = Vec::with_capacity(source.len());

        for (i, s) in source.iter().enumerate() {
            let mut best = u32::MAX;
            let mut best_j = 0usize;
            for (j, t) in target.iter().enumerate() {
                let d = s.descriptor.distance(&t.descriptor);
                if d < best {
                    best = d;
                    best_j = j;
                }
            }
            if !target.is_empty() && best <= max_distance {
                pairs.push((i, best_j, best));
            }
        }

        pairs
    }
}

/// Mutual (cross-checked) nearest-neighbor pairing.
///
/// Keeps a pair only when the source and target keypoints are each other's
/// nearest descriptor, trading recall for precision.
#[derive(Clone, Copy, Debug, Default)]
pub struct MutualNearestNeighbor;

impl MatchingPolicy for MutualNearestNeighbor {
    fn pair(
        &self,
        source: &[Keypoint],
        target: &[Keypoint],
        max_distance: u32,
    ) -> Vec<(usize, usize, u32)> {
        if source.is_empty() || target.is_empty() {
            return Vec::new();
        }

        let forward = NearestNeighbor.pair(source, target, max_distance);

        let mut rev_best_i = vec![0usize; target.len()];
        let mut rev_best = vec![u32::MAX; target.len()];
        for (i, s) in source.iter().enumerate() {
            for (j, t) in target.iter().enumerate() {
                let d = s.descriptor.distance(&t.descriptor);
                if d < rev_best[j] {
                    rev_best[j] = d;
                    rev_best_i[j] = i;
                }
            }
        }

        forward
            .into_iter()
            .filter(|&(i, j, _)| rev_best_i[j] == i)
            .collect()
    }
}

/// Configuration for candidate generation.
#[derive(Clone, Copy, Debug)]
pub struct MatchConfig {
    /// Fixed descriptor-distance cutoff; pairings above it are discarded.
    /// The unit is the descriptor metric, here Hamming bits out of 256.
    pub max_distance: u32,
    /// Keep only this many closest candidates after sorting by distance.
    pub max_candidates: Option<usize>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_distance: 100,
            max_candidates: Some(90),
        }
    }
}

/// Pair two keypoint sets and annotate each surviving pairing with its
/// shift attributes.
///
/// Keypoint positions are truncated to whole pixels before the shift is
/// derived. The result is stably sorted by descriptor distance ascending,
/// so identical inputs always produce the identical candidate sequence.
pub fn match_keypoints<P: MatchingPolicy>(
    policy: &P,
    source: &[Keypoint],
    target: &[Keypoint],
    config: &MatchConfig,
) -> Vec<MatchCandidate> {
    let pairs = policy.pair(source, target, config.max_distance);

    let mut candidates: Vec<MatchCandidate> = pairs
        .into_iter()
        .map(|(i, j, distance)| {
            let s = &source[i];
            let t = &target[j];
            MatchCandidate::new(
                [s.x as u32, s.y as u32],
                [t.x as u32, t.y as u32],
                distance,
            )
        })
        .collect();

    candidates.sort_by_key(|c| c.distance);
    if let Some(limit) = config.max_candidates {
        candidates.truncate(limit);
    }

    candidates
}

/// Mean shift over a set of candidates, rounded to whole pixels.
///
/// A quick global offset estimate when consensus selection is not needed,
/// e.g. for sanity-checking a pipeline run. Returns `None` for an empty
/// set.
pub fn mean_offset(candidates: &[MatchCandidate]) -> Option<(i32, i32)> {
    if candidates.is_empty() {
        return None;
    }

    let n = candidates.len() as f64;
    let sum_x: f64 = candidates.iter().map(|c| c.shift[0] as f64).sum();
    let sum_y: f64 = candidates.iter().map(|c| c.shift[1] as f64).sum();

    Some(((sum_x / n).round() as i32, (sum_y / n).round() as i32))
}
