use georeg_raster::RasterError;

/// An error type for the co-registration pipeline.
///
/// Every stage fails fast with one of these; no stage retries internally or
/// substitutes a default result. A caller that wants to relax thresholds
/// re-runs the stage with a different configuration.
#[derive(thiserror::Error, Debug)]
pub enum RegistrationError {
    /// Error from the underlying raster containers.
    #[error(transparent)]
    RasterError(#[from] RasterError),

    /// One of the bands produced no keypoints.
    #[error("No keypoints extracted from the {0} band")]
    NoKeypoints(&'static str),

    /// The matcher produced no candidates to select from.
    #[error("No match candidates to select from")]
    NoCandidates,

    /// No cluster of consistent matches was large enough to trust.
    #[error("No consensus cluster reached the minimum size of {min_cluster_size} (largest was {largest_cluster})")]
    InsufficientConsensus {
        /// The minimum cluster size required by the selector configuration.
        min_cluster_size: usize,
        /// Size of the largest cluster that was found.
        largest_cluster: usize,
    },
}
