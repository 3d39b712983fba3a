use crate::error::RegistrationError;
use crate::matcher::MatchCandidate;

/// Configuration for consensus selection.
#[derive(Clone, Copy, Debug)]
pub struct SelectConfig {
    /// Maximum angle gap, in degrees, between consecutive angle-sorted
    /// candidates of one cluster. A tunable, not a law of physics.
    pub angle_tolerance: f32,
    /// Minimum cluster size for a cluster to count as consensus.
    pub min_cluster_size: usize,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            angle_tolerance: 0.1,
            min_cluster_size: 4,
        }
    }
}

/// Select the single most geometrically consistent candidate.
///
/// Candidates are sorted by shift angle and split into clusters wherever
/// the gap between consecutive angles exceeds the tolerance; the clusters
/// partition the candidate set. Every cluster reaching the minimum size is
/// scored by the population variance of its shift magnitudes, the
/// lowest-variance cluster wins, and ties go to the larger cluster (more
/// supporting evidence for the same offset). The returned candidate is the
/// winning cluster's smallest-distance member.
///
/// This is a cheap 1-D consensus scheme: a real registration offset shows
/// up as many candidates agreeing in both angle and magnitude, while
/// spurious matches scatter across both axes.
///
/// # Errors
///
/// * [`RegistrationError::NoCandidates`] when `candidates` is empty.
/// * [`RegistrationError::InsufficientConsensus`] when no cluster reaches
///   the minimum size. Callers wanting a laxer answer re-run with a smaller
///   `min_cluster_size`; nothing is guessed silently.
pub fn select_best_match(
    candidates: &[MatchCandidate],
    config: &SelectConfig,
) -> Result<MatchCandidate, RegistrationError> {
    if candidates.is_empty() {
        return Err(RegistrationError::NoCandidates);
    }

    let mut by_angle: Vec<&MatchCandidate> = candidates.iter().collect();
    by_angle.sort_by(|a, b| a.angle.total_cmp(&b.angle));

    let mut best: Option<(f64, usize, &MatchCandidate)> = None; // (variance, size, winner)
    let mut largest_cluster = 0usize;

    let mut start = 0usize;
    for end in 1..=by_angle.len() {
        let cluster_ends = end == by_angle.len()
            || by_angle[end].angle - by_angle[end - 1].angle > config.angle_tolerance;
        if !cluster_ends {
            continue;
        }

        let cluster = &by_angle[start..end];
        start = end;
        largest_cluster = largest_cluster.max(cluster.len());

        if cluster.len() < config.min_cluster_size {
            continue;
        }

        let variance = magnitude_variance(cluster);
        let better = match best {
            None => true,
            Some((best_var, best_size, _)) => {
                variance < best_var || (variance == best_var && cluster.len() > best_size)
            }
        };
        if better {
            // clusters are non-empty ranges, so the scan always has a seed
            let mut winner = cluster[0];
            for &c in &cluster[1..] {
                if c.distance < winner.distance {
                    winner = c;
                }
            }
            best = Some((variance, cluster.len(), winner));
        }
    }

    match best {
        Some((_, _, winner)) => Ok(*winner),
        None => Err(RegistrationError::InsufficientConsensus {
            min_cluster_size: config.min_cluster_size,
            largest_cluster,
        }),
    }
}

// Population variance of the shift magnitudes, accumulated in f64 so the
// comparison between clusters is stable.
fn magnitude_variance(cluster: &[&MatchCandidate]) -> f64 {
    let n = cluster.len() as f64;
    let mean = cluster.iter().map(|c| c.magnitude as f64).sum::<f64>() / n;
    cluster
        .iter()
        .map(|c| {
            let d = c.magnitude as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}
