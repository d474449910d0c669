//! Parallel batch fitting.
//!
//! The estimator is pure and reentrant, so fitting many spectra is an
//! embarrassingly parallel map. Per-spectrum failures stay in their slot;
//! one bad spectrum never aborts the batch.

use rayon::prelude::*;

use crate::domain::{BaselineFit, FitSettings, Spectrum};
use crate::error::FitError;
use crate::fit::estimator::estimate;

/// Fit every spectrum with the same settings, in parallel.
///
/// Results are positionally aligned with the input slice.
pub fn estimate_batch(
    spectra: &[Spectrum],
    settings: &FitSettings,
) -> Vec<Result<BaselineFit, FitError>> {
    spectra
        .par_iter()
        .map(|s| estimate(&s.x, &s.y, settings, None))
        .collect()
}
