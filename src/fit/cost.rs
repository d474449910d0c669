//! Cost-function adjustments for the reweighting loop.
//!
//! Each iteration adds a per-sample adjustment `d` to the (normalized)
//! signal before re-solving the least-squares problem. The adjustment is the
//! sub-gradient surrogate of the chosen robust cost evaluated at the current
//! residual: quadratic-region residuals are shrunk, outlier-region residuals
//! are flattened (Huber) or cancelled outright (truncated quadratic).
//!
//! The dispatch is resolved once per fit to a plain function pointer, so the
//! loop body never re-branches on the variant.

use crate::domain::CostFunction;

/// Fixed scale parameter of the IRLS surrogate (`0.99 * 1/2`).
pub const ALPHA: f64 = 0.495;

/// A per-sample adjustment: `(residual, threshold) -> d`.
pub type AdjustmentFn = fn(f64, f64) -> f64;

impl CostFunction {
    /// Resolve the variant to its adjustment function.
    pub fn adjustment_fn(self) -> AdjustmentFn {
        match self {
            CostFunction::SymmetricHuber => symmetric_huber,
            CostFunction::AsymmetricHuber => asymmetric_huber,
            CostFunction::SymmetricTruncatedQuadratic => symmetric_truncated_quadratic,
            CostFunction::AsymmetricTruncatedQuadratic => asymmetric_truncated_quadratic,
        }
    }
}

fn symmetric_huber(res: f64, threshold: f64) -> f64 {
    if res.abs() < threshold {
        res * (2.0 * ALPHA - 1.0)
    } else if res <= -threshold {
        -2.0 * ALPHA * threshold - res
    } else {
        2.0 * ALPHA * threshold - res
    }
}

fn asymmetric_huber(res: f64, threshold: f64) -> f64 {
    if res < threshold {
        res * (2.0 * ALPHA - 1.0)
    } else {
        2.0 * ALPHA * threshold - res
    }
}

fn symmetric_truncated_quadratic(res: f64, threshold: f64) -> f64 {
    if res.abs() < threshold {
        res * (2.0 * ALPHA - 1.0)
    } else {
        -res
    }
}

fn asymmetric_truncated_quadratic(res: f64, threshold: f64) -> f64 {
    if res < threshold {
        res * (2.0 * ALPHA - 1.0)
    } else {
        -res
    }
}
