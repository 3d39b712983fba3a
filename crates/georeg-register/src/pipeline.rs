use georeg_imgproc::features::KeypointExtractor;
use georeg_imgproc::interpolation::InterpolationMode;
use georeg_raster::RasterBand;

use crate::correct::{correct_band, translation_offset};
use crate::error::RegistrationError;
use crate::matcher::{match_keypoints, MatchCandidate, MatchConfig, NearestNeighbor};
use crate::select::{select_best_match, SelectConfig};

/// Configuration for the full co-registration pipeline.
#[derive(Clone, Debug)]
pub struct RegistrationConfig {
    /// Keypoint extraction settings, applied to both bands.
    pub extractor: KeypointExtractor,
    /// Candidate generation settings.
    pub matching: MatchConfig,
    /// Consensus selection settings.
    pub selection: SelectConfig,
    /// Interpolation used when resampling the corrected band.
    pub interpolation: InterpolationMode,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            extractor: KeypointExtractor::default(),
            matching: MatchConfig::default(),
            selection: SelectConfig::default(),
            interpolation: InterpolationMode::Bilinear,
        }
    }
}

/// Result of a co-registration run.
#[derive(Clone, Debug)]
pub struct Registration {
    /// The target band resampled onto the reference grid.
    pub corrected: RasterBand<f32>,
    /// The selected best match.
    pub best_match: MatchCandidate,
    /// Pixel offset (dx, dy) measured between target and reference.
    pub offset: (i32, i32),
    /// Number of candidates that survived matching.
    pub num_candidates: usize,
}

/// Co-register a target band to a reference band.
///
/// Runs extract -> match -> select -> correct with the one-directional
/// nearest-neighbor policy. The bands must be quantized to 8 bits; masks,
/// when given, flag valid pixels (see
/// `georeg_raster::ops::nodata_mask`).
///
/// All stages are pure, so independent image pairs can be processed
/// concurrently by the caller; nothing here retains state across calls.
///
/// # Errors
///
/// Fails fast with a [`RegistrationError`] when either band yields no
/// keypoints, no candidates survive matching, or no consensus cluster is
/// found. Partial results are never promoted to a correction.
pub fn coregister(
    reference: &RasterBand<u8>,
    target: &RasterBand<u8>,
    reference_mask: Option<&[bool]>,
    target_mask: Option<&[bool]>,
    config: &RegistrationConfig,
) -> Result<Registration, RegistrationError> {
    let ref_keypoints = config.extractor.extract(reference, reference_mask)?;
    log::debug!("reference keypoints: {}", ref_keypoints.len());
    if ref_keypoints.is_empty() {
        return Err(RegistrationError::NoKeypoints("reference"));
    }

    let target_keypoints = config.extractor.extract(target, target_mask)?;
    log::debug!("target keypoints: {}", target_keypoints.len());
    if target_keypoints.is_empty() {
        return Err(RegistrationError::NoKeypoints("target"));
    }

    let candidates = match_keypoints(
        &NearestNeighbor,
        &ref_keypoints,
        &target_keypoints,
        &config.matching,
    );
    log::debug!("match candidates: {}", candidates.len());

    let best_match = select_best_match(&candidates, &config.selection)?;
    let offset = translation_offset(&best_match);
    log::debug!("selected offset: ({}, {})", offset.0, offset.1);

    let corrected = correct_band(&target.cast::<f32>()?, &best_match, config.interpolation);

    Ok(Registration {
        corrected,
        best_match,
        offset,
        num_candidates: candidates.len(),
    })
}
