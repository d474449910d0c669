//! The core baseline estimator.
//!
//! Given a spectrum, a polynomial order, a threshold, and a cost function,
//! estimate the background as the polynomial minimizing a non-quadratic cost
//! on the residuals, via iteratively reweighted least squares:
//!
//! - keep only masked-in samples and sort them by axis
//! - rescale axis, signal, and threshold onto `[-1, 1]` for conditioning
//! - solve an ordinary least-squares fit, then repeatedly re-solve with
//!   per-sample cost-function adjustments until the fitted curve stabilizes
//! - re-evaluate the converged polynomial on the entire original axis (in
//!   original sample order) and undo the signal rescaling
//!
//! The estimator is a pure function: deterministic output for deterministic
//! input, no logging, no shared state. Independent calls are safe to run
//! concurrently.

use nalgebra::DVector;

use crate::domain::{BaselineFit, FitSettings};
use crate::error::FitError;
use crate::math::{AxisScale, DesignMatrix, SignalScale, denormalize_coefficients, eval_poly};

/// Relative-change tolerance on the fitted curve between iterations.
const CONVERGENCE_TOLERANCE: f64 = 1e-9;

/// Estimate the background of a one-dimensional signal.
///
/// # Arguments
/// - `x`, `y`: axis positions and observed values, equal length, any order
/// - `settings`: polynomial order, threshold, cost function, iteration cap
/// - `mask`: optional validity mask aligned with `x`/`y`; `true` marks
///   samples participating in the fit. `None` means all samples are valid.
///
/// The returned baseline is index-for-index with the original input axis;
/// masked-out samples do not influence the fit but still get a baseline
/// value. Coefficients are ascending-power and evaluate directly on the
/// original axis in original signal units.
pub fn estimate(
    x: &[f64],
    y: &[f64],
    settings: &FitSettings,
    mask: Option<&[bool]>,
) -> Result<BaselineFit, FitError> {
    if x.len() != y.len() {
        return Err(FitError::InvalidInput(format!(
            "Axis and signal lengths differ: {} vs {}.",
            x.len(),
            y.len()
        )));
    }
    if let Some(mask) = mask {
        if mask.len() != x.len() {
            return Err(FitError::InvalidInput(format!(
                "Mask length {} does not match sample count {}.",
                mask.len(),
                x.len()
            )));
        }
    }
    if !(settings.threshold.is_finite() && settings.threshold > 0.0) {
        return Err(FitError::InvalidInput(format!(
            "Threshold must be a positive finite number, got {}.",
            settings.threshold
        )));
    }
    if x.iter().any(|v| !v.is_finite()) || y.iter().any(|v| !v.is_finite()) {
        return Err(FitError::InvalidInput(
            "Axis and signal values must be finite.".to_string(),
        ));
    }

    // Keep only masked-in samples.
    let mut valid: Vec<(f64, f64)> = match mask {
        Some(mask) => x
            .iter()
            .zip(y.iter())
            .zip(mask.iter())
            .filter(|&(_, &keep)| keep)
            .map(|((&xi, &yi), _)| (xi, yi))
            .collect(),
        None => x.iter().zip(y.iter()).map(|(&xi, &yi)| (xi, yi)).collect(),
    };

    let required = settings.order + 1;
    if valid.len() < required {
        return Err(FitError::UnderdeterminedFit {
            valid: valid.len(),
            required,
        });
    }

    // Sort the working set by ascending axis.
    valid.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let count = valid.len();
    let first = valid[0].0;
    let last = valid[count - 1].0;
    let axis_scale = AxisScale::from_span(first, last).ok_or(FitError::DegenerateAxis)?;

    let (min_y, max_y) = valid
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, yi)| {
            (lo.min(yi), hi.max(yi))
        });
    let signal_scale = SignalScale::from_range(min_y, max_y).ok_or(FitError::DegenerateSignal)?;

    let scaled_x: Vec<f64> = valid.iter().map(|&(xi, _)| axis_scale.apply(xi)).collect();
    let scaled_y = DVector::from_iterator(count, valid.iter().map(|&(_, yi)| signal_scale.apply(yi)));
    let threshold = signal_scale.scale_threshold(settings.threshold);

    // The design matrix (and its factorization) never changes across
    // iterations; only the right-hand side does.
    let design = DesignMatrix::new(&scaled_x, settings.order);

    // Initial ordinary least-squares fit.
    let mut a = design.solve(&scaled_y).ok_or(FitError::DegenerateAxis)?;
    let mut z = design.eval(&a);

    let adjust = settings.cost.adjustment_fn();
    let mut iterations = 0usize;
    // The first convergence check compares against a vector of ones, which
    // guarantees at least one reweighting pass on any rescaled signal.
    let mut z_prev = DVector::from_element(count, 1.0);

    while relative_change(&z, &z_prev) > CONVERGENCE_TOLERANCE {
        if iterations >= settings.max_iterations {
            return Err(FitError::ConvergenceFailure { iterations });
        }
        iterations += 1;
        z_prev = z;

        let rhs = DVector::from_fn(count, |i, _| {
            scaled_y[i] + adjust(scaled_y[i] - z_prev[i], threshold)
        });
        a = design.solve(&rhs).ok_or(FitError::DegenerateAxis)?;
        z = design.eval(&a);
    }

    // Re-evaluate the converged polynomial on the full original axis (same
    // affine maps, original sample order) and undo the signal rescaling.
    let baseline: Vec<f64> = x
        .iter()
        .map(|&xi| signal_scale.invert(eval_poly(a.as_slice(), axis_scale.apply(xi))))
        .collect();

    let coefficients = denormalize_coefficients(a.as_slice(), &axis_scale, &signal_scale);

    Ok(BaselineFit {
        baseline,
        coefficients,
        iterations,
    })
}

fn relative_change(z: &DVector<f64>, z_prev: &DVector<f64>) -> f64 {
    (z - z_prev).norm_squared() / z_prev.norm_squared()
}
